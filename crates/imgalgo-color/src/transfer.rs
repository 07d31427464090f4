//! sRGB transfer function (IEC 61966-2-1).
//!
//! Piecewise: a linear segment near black and a 2.4 power curve above it.
//! The linear segment also carries negative values, so out-of-gamut input
//! survives a decode/encode round trip.

/// sRGB EOTF: decodes sRGB-encoded values to linear light.
///
/// ```text
/// if V <= 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
///
/// # Example
///
/// ```rust
/// use imgalgo_color::transfer::srgb_eotf;
///
/// assert!((srgb_eotf(0.5) - 0.214).abs() < 1e-3);
/// ```
#[inline]
pub fn srgb_eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: encodes linear light to sRGB.
///
/// ```text
/// if L <= 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn srgb_oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Decodes an sRGB triplet in place.
#[inline]
pub fn srgb_to_linear(rgb: &mut [f32; 3]) {
    for c in rgb.iter_mut() {
        *c = srgb_eotf(*c);
    }
}

/// Encodes a linear triplet to sRGB in place.
#[inline]
pub fn linear_to_srgb(rgb: &mut [f32; 3]) {
    for c in rgb.iter_mut() {
        *c = srgb_oetf(*c);
    }
}
