//! Benchmarks for imgalgo operations.
//!
//! Run with: `cargo bench`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use imgalgo_color::{Conversion, colorconvert, colormath};
use imgalgo_core::{ColorSpace, ImageBuf, ProcessOptions, parallel};
use imgalgo_math::SRGB_TO_XYZ;
use imgalgo_ops::{FillHolesOptions, Filter, ResizeOptions, convolve_image, fill_holes_with, make_kernel, resize_image};

const SIZES: [u32; 3] = [256, 512, 1024];

fn gradient(size: u32, channels: usize) -> ImageBuf {
    let mut img = ImageBuf::new(size, size, channels);
    let denom = (size * size) as f32;
    for y in 0..size {
        for x in 0..size {
            let t = (y * size + x) as f32 / denom;
            let px = [t, 1.0 - t, (t * 7.0).fract(), 1.0];
            img.set_pixel(x, y, &px[..channels]);
        }
    }
    img
}

/// Per-pixel color math, single threaded.
fn bench_colormath(c: &mut Criterion) {
    let mut group = c.benchmark_group("colormath");

    let values: Vec<[f32; 3]> = (0..10000)
        .map(|i| {
            let t = i as f32 / 10000.0;
            [t, (t * 3.0).fract(), 1.0 - t]
        })
        .collect();
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("mat3_apply", |b| {
        b.iter(|| values.iter().map(|&v| SRGB_TO_XYZ.apply(black_box(v))).collect::<Vec<_>>())
    });

    group.bench_function("rgb_to_lab", |b| {
        b.iter(|| {
            values
                .iter()
                .map(|&v| {
                    let mut px = black_box(v);
                    colormath::rgb_to_lab(&mut px);
                    px
                })
                .collect::<Vec<_>>()
        })
    });

    let conversion = Conversion::resolve(ColorSpace::Srgb, ColorSpace::Lab).unwrap();
    group.bench_function("srgb_to_lab_conversion", |b| {
        b.iter(|| {
            values
                .iter()
                .map(|&v| {
                    let mut px = black_box(v);
                    conversion.apply(&mut px);
                    px
                })
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

/// Parallel pixel processing against a sequential run.
fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_image");

    for size in SIZES {
        let src = gradient(size, 4);
        group.throughput(Throughput::Elements(u64::from(size * size)));

        group.bench_with_input(BenchmarkId::new("parallel", size), &src, |b, src| {
            b.iter_batched_ref(
                || src.clone(),
                |img| parallel::process_image(img, |px| px.channels_mut()[0] *= 0.5),
                criterion::BatchSize::LargeInput,
            )
        });

        let sequential = ProcessOptions::sequential();
        group.bench_with_input(BenchmarkId::new("sequential", size), &src, |b, src| {
            b.iter_batched_ref(
                || src.clone(),
                |img| parallel::process_image_with(img, &sequential, |px| px.channels_mut()[0] *= 0.5),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

/// Whole-image color conversion.
fn bench_colorconvert(c: &mut Criterion) {
    let mut group = c.benchmark_group("colorconvert");

    for size in SIZES {
        let src = gradient(size, 3);
        group.throughput(Throughput::Elements(u64::from(size * size)));

        for (name, from, to) in [
            ("srgb_to_lab", ColorSpace::Srgb, ColorSpace::Lab),
            ("linear_to_xyz", ColorSpace::Linear, ColorSpace::Xyz),
            ("srgb_to_acescg", ColorSpace::Srgb, ColorSpace::AcesCg),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &src, |b, src| {
                b.iter_batched_ref(
                    || src.clone(),
                    |img| colorconvert(img, from, to).unwrap(),
                    criterion::BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

/// Hole filling on a centered square hole covering a quarter of the image.
fn bench_fill_holes(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_holes");
    group.sample_size(10);

    for size in [128u32, 256, 512] {
        let src = gradient(size, 3);
        let (lo, hi) = (size / 4, size * 3 / 4);
        let mask: Vec<f32> = (0..size * size)
            .map(|i| {
                let (x, y) = (i % size, i / size);
                if (lo..hi).contains(&x) && (lo..hi).contains(&y) { 0.0 } else { 1.0 }
            })
            .collect();
        let opts = FillHolesOptions::default();
        group.throughput(Throughput::Elements(u64::from(size * size)));

        group.bench_with_input(BenchmarkId::new("square", size), &src, |b, src| {
            b.iter_batched_ref(
                || src.clone(),
                |img| fill_holes_with(img, &mask, &opts).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

/// Downscaling and convolution.
fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    let src = gradient(1024, 3);

    for filter in [Filter::Box, Filter::Triangle, Filter::Lanczos3] {
        let opts = ResizeOptions::new(filter);
        group.bench_function(BenchmarkId::new("resize_x4", filter.name()), |b| {
            b.iter(|| resize_image(black_box(&src), 4, &opts).unwrap())
        });
    }

    for name in ["gaussian", "box"] {
        let kernel = make_kernel(name, 5.0, 5.0).unwrap();
        group.bench_function(BenchmarkId::new("convolve_5x5", name), |b| {
            b.iter(|| convolve_image(black_box(&src), &kernel).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_colormath,
    bench_process,
    bench_colorconvert,
    bench_fill_holes,
    bench_resample
);
criterion_main!(benches);
