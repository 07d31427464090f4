//! Per-pixel conversions between linear RGB, CIE XYZ and CIE L\*a\*b\*.
//!
//! Every function rewrites one triplet in place. They allocate nothing and
//! hold no state, so they are safe to call from any number of workers.
//!
//! # Constants
//!
//! - RGB/XYZ: IEC 61966-2-1 sRGB primaries, D65 ([`SRGB_TO_XYZ`]).
//! - LAB: CIE 1976 with the reference white taken from the row sums of
//!   that matrix, so RGB `(1, 1, 1)` lands exactly on `L* = 100, a* = b* = 0`.
//!
//! ```text
//! f(t) = cbrt(t)                 t >  (6/29)^3
//!      = t / (3 (6/29)^2) + 4/29  otherwise
//!
//! L* = 116 f(Y/Yn) - 16
//! a* = 500 (f(X/Xn) - f(Y/Yn))
//! b* = 200 (f(Y/Yn) - f(Z/Zn))
//! ```
//!
//! L\* spans `[0, 100]`; a\* and b\* are left unnormalized.
//!
//! # Example
//!
//! ```rust
//! use imgalgo_color::colormath::{lab_to_rgb, rgb_to_lab};
//!
//! let mut px = [1.0, 1.0, 1.0];
//! rgb_to_lab(&mut px);
//! assert!((px[0] - 100.0).abs() < 1e-3);
//! assert!(px[1].abs() < 1e-3 && px[2].abs() < 1e-3);
//!
//! lab_to_rgb(&mut px);
//! assert!((px[1] - 1.0).abs() < 1e-4);
//! ```

use imgalgo_math::{Mat3, SRGB_TO_XYZ, XYZ_TO_SRGB};

const fn row_sums(m: &Mat3) -> [f32; 3] {
    let m = &m.m;
    [
        m[0][0] + m[0][1] + m[0][2],
        m[1][0] + m[1][1] + m[1][2],
        m[2][0] + m[2][1] + m[2][2],
    ]
}

/// LAB reference white (D65), the XYZ of linear RGB `(1, 1, 1)`.
pub const WHITE_XYZ: [f32; 3] = row_sums(&SRGB_TO_XYZ);

const DELTA: f32 = 6.0 / 29.0;
const EPSILON: f32 = DELTA * DELTA * DELTA;
const SLOPE: f32 = 3.0 * DELTA * DELTA;
const OFFSET: f32 = 4.0 / 29.0;

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        t / SLOPE + OFFSET
    }
}

#[inline]
fn lab_f_inv(f: f32) -> f32 {
    if f > DELTA {
        f * f * f
    } else {
        SLOPE * (f - OFFSET)
    }
}

/// Linear RGB to XYZ (D65).
#[inline]
pub fn rgb_to_xyz(px: &mut [f32; 3]) {
    *px = SRGB_TO_XYZ.apply(*px);
}

/// XYZ (D65) to linear RGB.
#[inline]
pub fn xyz_to_rgb(px: &mut [f32; 3]) {
    *px = XYZ_TO_SRGB.apply(*px);
}

/// XYZ (D65) to L\*a\*b\*.
///
/// XYZ = 0 maps to `(0, 0, 0)` without producing NaN.
#[inline]
pub fn xyz_to_lab(px: &mut [f32; 3]) {
    // White is a nonzero constant; the linear branch of lab_f keeps Y = 0 finite
    let fx = lab_f(px[0] / WHITE_XYZ[0]);
    let fy = lab_f(px[1] / WHITE_XYZ[1]);
    let fz = lab_f(px[2] / WHITE_XYZ[2]);
    *px = [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)];
}

/// L\*a\*b\* to XYZ (D65).
#[inline]
pub fn lab_to_xyz(px: &mut [f32; 3]) {
    let fy = (px[0] + 16.0) / 116.0;
    let fx = fy + px[1] / 500.0;
    let fz = fy - px[2] / 200.0;
    *px = [
        WHITE_XYZ[0] * lab_f_inv(fx),
        WHITE_XYZ[1] * lab_f_inv(fy),
        WHITE_XYZ[2] * lab_f_inv(fz),
    ];
}

/// Linear RGB to L\*a\*b\*, through XYZ.
#[inline]
pub fn rgb_to_lab(px: &mut [f32; 3]) {
    rgb_to_xyz(px);
    xyz_to_lab(px);
}

/// L\*a\*b\* to linear RGB, through XYZ.
#[inline]
pub fn lab_to_rgb(px: &mut [f32; 3]) {
    lab_to_xyz(px);
    xyz_to_rgb(px);
}
