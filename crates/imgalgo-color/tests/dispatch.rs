//! Dispatcher behavior across thread pools and error paths.

use imgalgo_color::{ColorError, colorconvert, colorconvert_named, colorconvert_to, colorconvert_with};
use imgalgo_core::{ColorSpace, ImageBuf, ProcessOptions};

fn pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .unwrap()
}

fn ramp(width: u32, height: u32) -> ImageBuf {
    let mut img = ImageBuf::new(width, height, 4);
    for y in 0..height {
        for x in 0..width {
            let t = (x + y * width) as f32 / (width * height) as f32;
            img.set_pixel(x, y, &[t, 1.0 - t, t * t, 1.0]);
        }
    }
    img
}

#[test]
fn pool_size_does_not_change_output() {
    let src = ramp(129, 77);
    let opts = ProcessOptions::default().with_min_pixels_per_chunk(32);

    let mut reference = src.clone();
    pool(1).install(|| colorconvert_with(&mut reference, ColorSpace::Srgb, ColorSpace::Lab, &opts)).unwrap();

    for threads in [2, 8] {
        let mut img = src.clone();
        pool(threads)
            .install(|| colorconvert_with(&mut img, ColorSpace::Srgb, ColorSpace::Lab, &opts))
            .unwrap();
        assert_eq!(img.data(), reference.data(), "threads={threads}");
    }
}

#[test]
fn unknown_name_fails_before_mutation() {
    let mut img = ramp(8, 8);
    let before = img.clone();
    let err = colorconvert_named(&mut img, "Rec.2100-PQ", ColorSpace::Linear).unwrap_err();
    assert!(matches!(
        err,
        ColorError::Image(imgalgo_core::Error::UnsupportedColorSpace { ref name }) if name == "Rec.2100-PQ"
    ));
    assert_eq!(img, before);
}

#[test]
fn named_matches_enum() {
    let mut a = ramp(16, 16);
    let mut b = a.clone();
    colorconvert_named(&mut a, "ACES2065-1", ColorSpace::Srgb).unwrap();
    colorconvert(&mut b, ColorSpace::Aces2065_1, ColorSpace::Srgb).unwrap();
    assert_eq!(a, b);
}

#[test]
fn convert_to_leaves_source() {
    let src = ramp(10, 10);
    let mut dst = ImageBuf::new_like(&src);
    colorconvert_to(&mut dst, &src, ColorSpace::Linear, ColorSpace::Xyz).unwrap();
    assert_eq!(src, ramp(10, 10));
    assert_ne!(dst.pixel(5, 5), src.pixel(5, 5));
    assert_eq!(dst.pixel(5, 5)[3], 1.0);
}

#[test]
fn convert_to_identity_copies() {
    let src = ramp(6, 6);
    let mut dst = ImageBuf::new_like(&src);
    colorconvert_to(&mut dst, &src, ColorSpace::Xyz, ColorSpace::Xyz).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn convert_to_channel_mismatch() {
    let src = ramp(6, 6);
    let mut dst = ImageBuf::new(6, 6, 3);
    let err = colorconvert_to(&mut dst, &src, ColorSpace::Srgb, ColorSpace::Linear).unwrap_err();
    assert!(err.is_channel_error());
    assert!(dst.data().iter().all(|&v| v == 0.0));
}
