//! Recognized color spaces and their external names.
//!
//! Pixels carry no color-space tag; the space a buffer is in is part of the
//! caller's contract. [`ColorSpace`] is the closed set of spaces that the
//! conversion graph in `imgalgo-color` knows how to reach.
//!
//! # Supported Color Spaces
//!
//! | Variant | Primaries | Transfer | White |
//! |---------|-----------|----------|-------|
//! | [`Linear`](ColorSpace::Linear) | Rec.709 | linear | D65 |
//! | [`Srgb`](ColorSpace::Srgb) | Rec.709 | sRGB curve | D65 |
//! | [`Aces2065_1`](ColorSpace::Aces2065_1) | AP0 | linear | ACES (~D60) |
//! | [`AcesCg`](ColorSpace::AcesCg) | AP1 | linear | ACES (~D60) |
//! | [`Xyz`](ColorSpace::Xyz) | CIE 1931 XYZ | linear | D65 |
//! | [`Lab`](ColorSpace::Lab) | CIE 1976 L\*a\*b\* | nonlinear | D65 |
//!
//! # Names
//!
//! File metadata and color-management configs name spaces with strings
//! (`"sRGB"`, `"Linear"`, `"ACES2065-1"`, ...). [`ColorSpace::from_name`]
//! maps them through a fixed lookup table, case-insensitively:
//!
//! ```
//! use imgalgo_core::ColorSpace;
//!
//! assert_eq!(ColorSpace::from_name("srgb"), Some(ColorSpace::Srgb));
//! assert_eq!(ColorSpace::from_name("lin_ap1"), Some(ColorSpace::AcesCg));
//! assert_eq!(ColorSpace::from_name("Rec.2100-PQ"), None);
//!
//! let parsed: ColorSpace = "ACES2065-1".parse().unwrap();
//! assert_eq!(parsed, ColorSpace::Aces2065_1);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A recognized color space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Linear light with sRGB/Rec.709 primaries and D65 white.
    Linear,
    /// sRGB-encoded (IEC 61966-2-1 transfer curve), Rec.709 primaries.
    Srgb,
    /// ACES2065-1: AP0 primaries, linear. Archival/interchange space.
    Aces2065_1,
    /// ACEScg: AP1 primaries, linear. Rendering/compositing space.
    AcesCg,
    /// CIE 1931 XYZ, D65-relative.
    Xyz,
    /// CIE 1976 L\*a\*b\*, D65 reference white. L\* in [0, 100].
    Lab,
}

/// External names accepted by [`ColorSpace::from_name`].
///
/// The first entry for each variant is its canonical name.
const NAMES: &[(&str, ColorSpace)] = &[
    ("Linear", ColorSpace::Linear),
    ("lin_srgb", ColorSpace::Linear),
    ("lin_rec709", ColorSpace::Linear),
    ("Linear Rec.709 (sRGB)", ColorSpace::Linear),
    ("sRGB", ColorSpace::Srgb),
    ("srgb_texture", ColorSpace::Srgb),
    ("srgb_tx", ColorSpace::Srgb),
    ("sRGB - Texture", ColorSpace::Srgb),
    ("ACES2065-1", ColorSpace::Aces2065_1),
    ("ACES", ColorSpace::Aces2065_1),
    ("lin_ap0", ColorSpace::Aces2065_1),
    ("ACEScg", ColorSpace::AcesCg),
    ("lin_ap1", ColorSpace::AcesCg),
    ("XYZ", ColorSpace::Xyz),
    ("CIE-XYZ-D65", ColorSpace::Xyz),
    ("LAB", ColorSpace::Lab),
    ("CIELAB", ColorSpace::Lab),
];

impl ColorSpace {
    /// Every recognized color space, in declaration order.
    pub const ALL: [ColorSpace; 6] = [
        ColorSpace::Linear,
        ColorSpace::Srgb,
        ColorSpace::Aces2065_1,
        ColorSpace::AcesCg,
        ColorSpace::Xyz,
        ColorSpace::Lab,
    ];

    /// Canonical name of this space.
    pub const fn name(self) -> &'static str {
        match self {
            ColorSpace::Linear => "Linear",
            ColorSpace::Srgb => "sRGB",
            ColorSpace::Aces2065_1 => "ACES2065-1",
            ColorSpace::AcesCg => "ACEScg",
            ColorSpace::Xyz => "XYZ",
            ColorSpace::Lab => "LAB",
        }
    }

    /// Whether channel values are proportional to light.
    #[inline]
    pub const fn is_linear(self) -> bool {
        !matches!(self, ColorSpace::Srgb | ColorSpace::Lab)
    }

    /// Whether the three channels are RGB tristimulus values.
    #[inline]
    pub const fn is_rgb(self) -> bool {
        matches!(
            self,
            ColorSpace::Linear | ColorSpace::Srgb | ColorSpace::Aces2065_1 | ColorSpace::AcesCg
        )
    }

    /// Resolves an external color-space name, ignoring ASCII case.
    ///
    /// Returns `None` for names outside the lookup table.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        NAMES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|&(_, space)| space)
    }

    /// All external names that resolve to this space.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        NAMES
            .iter()
            .filter(move |(_, space)| *space == self)
            .map(|&(alias, _)| alias)
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::unsupported_color_space(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_roundtrip() {
        for space in ColorSpace::ALL {
            assert_eq!(ColorSpace::from_name(space.name()), Some(space));
            assert_eq!(space.aliases().next(), Some(space.name()));
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(ColorSpace::from_name("SRGB"), Some(ColorSpace::Srgb));
        assert_eq!(ColorSpace::from_name("linear"), Some(ColorSpace::Linear));
        assert_eq!(ColorSpace::from_name("acescg"), Some(ColorSpace::AcesCg));
        assert_eq!(ColorSpace::from_name("  lab "), Some(ColorSpace::Lab));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(ColorSpace::from_name("ProPhoto"), None);
        let err = "ProPhoto".parse::<ColorSpace>().unwrap_err();
        assert!(err.is_color_space_error());
    }

    #[test]
    fn test_linearity() {
        assert!(ColorSpace::Linear.is_linear());
        assert!(ColorSpace::AcesCg.is_linear());
        assert!(ColorSpace::Xyz.is_linear());
        assert!(!ColorSpace::Srgb.is_linear());
        assert!(!ColorSpace::Lab.is_linear());
    }

    #[test]
    fn test_rgb_family() {
        assert!(ColorSpace::Srgb.is_rgb());
        assert!(ColorSpace::Aces2065_1.is_rgb());
        assert!(!ColorSpace::Xyz.is_rgb());
        assert!(!ColorSpace::Lab.is_rgb());
    }

    #[test]
    fn test_display() {
        assert_eq!(ColorSpace::Aces2065_1.to_string(), "ACES2065-1");
    }
}
