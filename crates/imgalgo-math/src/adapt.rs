//! Chromatic adaptation between white points.
//!
//! ACES spaces use a D60-like white while sRGB and XYZ here are D65, so
//! moving between them needs a von Kries-style transform. Bradford is the
//! only cone space provided.
//!
//! ```rust
//! use imgalgo_math::{adapt_matrix, ACES_AP1, BRADFORD, SRGB};
//!
//! let (d65, d60) = (SRGB.white_xyz(), ACES_AP1.white_xyz());
//! let white = adapt_matrix(BRADFORD, d65, d60) * d65;
//! assert!((white[2] - d60[2]).abs() < 1e-3);
//! ```

use crate::Mat3;

/// Bradford cone response matrix.
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// Computes an adaptation matrix mapping XYZ under `src_white` to XYZ under
/// `dst_white`.
///
/// `M^-1 * diag(dst_cone / src_cone) * M`, where `M` is the cone matrix.
pub fn adapt_matrix(method: Mat3, src_white: [f32; 3], dst_white: [f32; 3]) -> Mat3 {
    let method_inv = method.inverse().unwrap_or(Mat3::IDENTITY);
    let (src, dst) = (method * src_white, method * dst_white);
    let ratio = |i: usize| dst[i] / src[i];
    method_inv * Mat3::diagonal(ratio(0), ratio(1), ratio(2)) * method
}
