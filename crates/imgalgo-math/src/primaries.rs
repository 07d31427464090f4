//! RGB primaries and the RGB/XYZ matrices derived from them.
//!
//! An RGB space is pinned down by the xy chromaticities of its three
//! primaries and its white point. [`rgb_to_xyz_matrix`] solves for the
//! matrix that sends `(1, 1, 1)` to that white.

use crate::{BRADFORD, Mat3, adapt_matrix};

/// xy chromaticity of D65.
pub const D65_XY: (f32, f32) = (0.3127, 0.3290);

/// xy chromaticity of the ACES white (~D60).
pub const D60_XY: (f32, f32) = (0.32168, 0.33767);

/// Chromaticity coordinates of an RGB color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f32, f32),
    /// Green primary (x, y)
    pub g: (f32, f32),
    /// Blue primary (x, y)
    pub b: (f32, f32),
    /// White point (x, y)
    pub w: (f32, f32),
    /// Human-readable name
    pub name: &'static str,
}

/// sRGB / Rec.709 primaries (D65 white).
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// ACES AP0 primaries, used by ACES2065-1.
pub const ACES_AP0: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.0000, 1.0000),
    b: (0.0001, -0.0770),
    w: D60_XY,
    name: "ACES AP0",
};

/// ACES AP1 primaries, used by ACEScg.
pub const ACES_AP1: Primaries = Primaries {
    r: (0.7130, 0.2930),
    g: (0.1650, 0.8300),
    b: (0.1280, 0.0440),
    w: D60_XY,
    name: "ACES AP1",
};

/// Linear sRGB to CIE XYZ (D65), IEC 61966-2-1.
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// CIE XYZ (D65) to linear sRGB; the inverse of [`SRGB_TO_XYZ`].
pub const XYZ_TO_SRGB: Mat3 = Mat3::from_rows([
    [3.2404548, -1.5371389, -0.4985315],
    [-0.9692664, 1.8760109, 0.0415561],
    [0.0556434, -0.2040259, 1.0572252],
]);

impl Primaries {
    /// XYZ of this space's white, normalized to Y = 1.
    pub fn white_xyz(&self) -> [f32; 3] {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

fn xy_to_xyz(x: f32, y: f32) -> [f32; 3] {
    if y.abs() < 1e-10 {
        [0.0; 3]
    } else {
        [x / y, 1.0, (1.0 - x - y) / y]
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// XYZ is relative to the primaries' own white point.
///
/// # Example
///
/// ```rust
/// use imgalgo_math::{rgb_to_xyz_matrix, ACES_AP1};
///
/// let m = rgb_to_xyz_matrix(&ACES_AP1);
/// let white = m * [1.0; 3];
/// assert!((white[1] - 1.0).abs() < 1e-4);
/// ```
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b = xy_to_xyz(primaries.b.0, primaries.b.1);

    // Scale columns so that M * (1, 1, 1) = W
    let m = Mat3::from_cols(r, g, b);
    let s = m.inverse().unwrap_or(Mat3::IDENTITY) * primaries.white_xyz();
    Mat3::from_cols(r.map(|v| v * s[0]), g.map(|v| v * s[1]), b.map(|v| v * s[2]))
}

/// Computes the XYZ to RGB matrix for a set of primaries.
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries)
        .inverse()
        .unwrap_or(Mat3::IDENTITY)
}

/// Matrix from linear sRGB (D65) to linear RGB in `dst`, Bradford-adapted.
///
/// # Example
///
/// ```rust
/// use imgalgo_math::{srgb_to_rgb_matrix, ACES_AP1};
///
/// // Neutral stays neutral across the white-point change.
/// let grey = srgb_to_rgb_matrix(&ACES_AP1) * [0.18; 3];
/// assert!((grey[0] - 0.18).abs() < 1e-3);
/// assert!((grey[2] - 0.18).abs() < 1e-3);
/// ```
pub fn srgb_to_rgb_matrix(dst: &Primaries) -> Mat3 {
    let cat = adapt_matrix(BRADFORD, SRGB.white_xyz(), dst.white_xyz());
    xyz_to_rgb_matrix(dst) * cat * rgb_to_xyz_matrix(&SRGB)
}

/// Inverse of [`srgb_to_rgb_matrix`].
pub fn rgb_to_srgb_matrix(src: &Primaries) -> Mat3 {
    srgb_to_rgb_matrix(src).inverse().unwrap_or(Mat3::IDENTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_srgb_matrix_matches_constant() {
        let m = rgb_to_xyz_matrix(&SRGB);
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(m[i][j], SRGB_TO_XYZ[i][j], epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_srgb_constants_inverse() {
        let id = XYZ_TO_SRGB * SRGB_TO_XYZ;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(id[i][j], expected, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_primaries_white() {
        for p in [SRGB, ACES_AP0, ACES_AP1] {
            let white = rgb_to_xyz_matrix(&p) * [1.0; 3];
            let expected = p.white_xyz();
            assert_abs_diff_eq!(white[0], expected[0], epsilon = 1e-4);
            assert_abs_diff_eq!(white[1], 1.0, epsilon = 1e-4);
            assert_abs_diff_eq!(white[2], expected[2], epsilon = 1e-4);
        }
    }

    #[test]
    fn test_ap0_known_values() {
        // ACES TB-2014-004
        let m = rgb_to_xyz_matrix(&ACES_AP0);
        assert_abs_diff_eq!(m[0][0], 0.9525524, epsilon = 1e-4);
        assert_abs_diff_eq!(m[1][1], 0.7281661, epsilon = 1e-4);
        assert_abs_diff_eq!(m[2][2], 1.0088252, epsilon = 1e-4);
    }

    #[test]
    fn test_srgb_to_ap1_roundtrip() {
        let fwd = srgb_to_rgb_matrix(&ACES_AP1);
        let back = rgb_to_srgb_matrix(&ACES_AP1);
        let v = [0.8, 0.2, 0.05];
        let r = back * (fwd * v);
        for i in 0..3 {
            assert_abs_diff_eq!(r[i], v[i], epsilon = 1e-5);
        }
    }
}
