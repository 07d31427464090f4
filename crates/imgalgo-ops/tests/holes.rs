//! Hole-filling scenarios on realistic masks.

use imgalgo_core::ImageBuf;
use imgalgo_ops::{Connectivity, FillHolesOptions, OpsError, fill_holes, fill_holes_rgb, fill_holes_with};

fn pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .unwrap()
}

/// RGB image with a horizontal ramp, and a mask punching out a disc.
fn ramp_with_disc(width: u32, height: u32, cx: f32, cy: f32, r: f32) -> (ImageBuf, Vec<f32>) {
    let mut img = ImageBuf::new(width, height, 3);
    let mut mask = vec![1.0f32; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let t = x as f32 / (width - 1) as f32;
            let inside = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2) <= r * r;
            if inside {
                mask[(y * width + x) as usize] = 0.0;
                img.set_pixel(x, y, &[-1.0, -1.0, -1.0]);
            } else {
                img.set_pixel(x, y, &[t, 0.5, 1.0 - t]);
            }
        }
    }
    (img, mask)
}

#[test]
fn all_valid_is_noop() {
    let (mut img, _) = ramp_with_disc(16, 8, -100.0, -100.0, 1.0);
    let before = img.clone();
    let stats = fill_holes(&mut img, &vec![1.0; 16 * 8]).unwrap();
    assert_eq!(stats.holes, 0);
    assert_eq!(stats.iterations, 0);
    assert!(stats.is_complete());
    assert_eq!(img, before);
}

#[test]
fn single_hole_takes_uniform_neighbor_value() {
    let mut img = ImageBuf::filled(5, 5, &[0.3, 0.6, 0.9]);
    img.set_pixel(2, 2, &[0.0, 0.0, 0.0]);
    let mut mask = vec![1.0; 25];
    mask[12] = 0.0;

    let stats = fill_holes(&mut img, &mask).unwrap();
    assert_eq!(stats.filled, 1);
    assert_eq!(stats.iterations, 1);
    let px = img.pixel(2, 2);
    assert!((px[0] - 0.3).abs() < 1e-6);
    assert!((px[1] - 0.6).abs() < 1e-6);
    assert!((px[2] - 0.9).abs() < 1e-6);
}

#[test]
fn all_zero_mask_leaves_image_unchanged() {
    let (mut img, _) = ramp_with_disc(9, 7, -100.0, -100.0, 1.0);
    let before = img.clone();
    let stats = fill_holes(&mut img, &vec![0.0; 9 * 7]).unwrap();
    assert_eq!(stats.holes, 63);
    assert_eq!(stats.filled, 0);
    assert_eq!(stats.unresolved, 63);
    assert!(!stats.is_complete());
    assert_eq!(img, before);
}

#[test]
fn valid_pixels_never_change() {
    let (mut img, mask) = ramp_with_disc(40, 30, 20.0, 15.0, 8.0);
    let before = img.clone();
    fill_holes(&mut img, &mask).unwrap();
    for (i, (a, b)) in img.data().chunks(3).zip(before.data().chunks(3)).enumerate() {
        if mask[i] > 0.0 {
            assert_eq!(a, b, "valid pixel {i} modified");
        }
    }
}

#[test]
fn disc_is_filled_within_neighbor_range() {
    let (mut img, mask) = ramp_with_disc(40, 30, 20.0, 15.0, 8.0);
    let stats = fill_holes(&mut img, &mask).unwrap();
    assert!(stats.is_complete());
    assert!(stats.holes > 150);
    assert!(stats.iterations <= 9);

    for (i, px) in img.data().chunks(3).enumerate() {
        if mask[i] > 0.0 {
            continue;
        }
        // Convex combinations of the ramp stay inside its range
        assert!((0.0..=1.0).contains(&px[0]), "pixel {i}: {px:?}");
        assert!((px[1] - 0.5).abs() < 1e-5);
        assert!((px[0] + px[2] - 1.0).abs() < 1e-4);
    }
}

#[test]
fn filled_ramp_is_monotone_across_the_hole() {
    let (mut img, mask) = ramp_with_disc(40, 30, 20.0, 15.0, 8.0);
    fill_holes(&mut img, &mask).unwrap();
    // Left side of the disc should be darker in red than the right side
    let left = img.pixel(14, 15)[0];
    let right = img.pixel(26, 15)[0];
    assert!(left < right, "left={left} right={right}");
}

#[test]
fn iteration_cap_leaves_far_pixels_unresolved() {
    let mut img = ImageBuf::new(6, 1, 1);
    img.set_pixel(0, 0, &[1.0]);
    let mask = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let opts = FillHolesOptions::default().with_max_iterations(2);

    let stats = fill_holes_with(&mut img, &mask, &opts).unwrap();
    assert_eq!(stats.iterations, 2);
    assert_eq!(stats.filled, 2);
    assert_eq!(stats.unresolved, 3);
    assert_eq!(img.data(), &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
}

#[test]
fn threshold_marks_low_confidence_as_holes() {
    let mut img = ImageBuf::filled(3, 1, &[0.5]);
    img.set_pixel(1, 0, &[9.0]);
    let mask = [1.0, 0.2, 1.0];

    let mut untouched = img.clone();
    let stats = fill_holes(&mut untouched, &mask).unwrap();
    assert_eq!(stats.holes, 0);
    assert_eq!(untouched.pixel(1, 0), &[9.0]);

    let opts = FillHolesOptions::default().with_threshold(0.5);
    let stats = fill_holes_with(&mut img, &mask, &opts).unwrap();
    assert_eq!(stats.holes, 1);
    assert!((img.pixel(1, 0)[0] - 0.5).abs() < 1e-6);
}

#[test]
fn higher_confidence_neighbor_dominates() {
    let mut img = ImageBuf::new(3, 1, 1);
    img.set_pixel(0, 0, &[0.0]);
    img.set_pixel(2, 0, &[1.0]);
    let mask = [0.1, 0.0, 0.9];
    let opts = FillHolesOptions::default().with_relaxation_passes(0);

    fill_holes_with(&mut img, &mask, &opts).unwrap();
    assert!((img.pixel(1, 0)[0] - 0.9).abs() < 1e-6);
}

#[test]
fn connectivity_changes_reach() {
    let (src, mask) = ramp_with_disc(20, 20, 10.0, 10.0, 5.0);

    let mut eight = src.clone();
    let s8 = fill_holes(&mut eight, &mask).unwrap();
    let mut four = src.clone();
    let s4 = fill_holes_with(
        &mut four,
        &mask,
        &FillHolesOptions::default().with_connectivity(Connectivity::Four),
    )
    .unwrap();

    assert!(s8.is_complete() && s4.is_complete());
    assert!(s4.iterations >= s8.iterations);
}

#[test]
fn result_independent_of_pool_size() {
    let (src, mask) = ramp_with_disc(64, 48, 30.0, 20.0, 12.0);
    let mut reference = src.clone();
    pool(1).install(|| fill_holes(&mut reference, &mask)).unwrap();

    for threads in [2, 8] {
        let mut img = src.clone();
        pool(threads).install(|| fill_holes(&mut img, &mask)).unwrap();
        assert_eq!(img.data(), reference.data(), "threads={threads}");
    }
}

#[test]
fn repeated_runs_are_identical() {
    let (src, mask) = ramp_with_disc(33, 21, 16.0, 10.0, 6.0);
    let mut a = src.clone();
    let mut b = src.clone();
    let sa = fill_holes(&mut a, &mask).unwrap();
    let sb = fill_holes(&mut b, &mask).unwrap();
    assert_eq!(sa, sb);
    assert_eq!(a, b);
}

#[test]
fn rgb_triplets_match_image_path() {
    let (src, mask) = ramp_with_disc(24, 16, 12.0, 8.0, 4.0);
    let mut img = src.clone();
    fill_holes(&mut img, &mask).unwrap();

    let mut rgb: Vec<[f32; 3]> = src.data().chunks(3).map(|c| [c[0], c[1], c[2]]).collect();
    fill_holes_rgb(24, 16, &mut rgb, &mask).unwrap();
    assert_eq!(rgb.as_flattened(), img.data());
}

#[test]
fn mask_length_mismatch_is_rejected() {
    let mut img = ImageBuf::new(4, 4, 3);
    let err = fill_holes(&mut img, &[1.0; 15]).unwrap_err();
    assert!(matches!(err, OpsError::DimensionMismatch(_)));
    assert!(err.is_dimension_error());
}
