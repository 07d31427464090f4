//! # imgalgo-math
//!
//! Small linear-algebra toolkit behind the color conversions.
//!
//! - [`Mat3`] - 3x3 matrices for RGB/XYZ transforms
//! - [`adapt_matrix`] - Bradford chromatic adaptation between white points
//! - [`Primaries`] - Chromaticities and the matrices derived from them
//!
//! Color triplets are plain `[f32; 3]` arrays, matching the pixel layout
//! used everywhere else.
//!
//! # Convention
//!
//! Matrices are **row-major** and act on **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use imgalgo_math::{SRGB_TO_XYZ, XYZ_TO_SRGB};
//!
//! let rgb = [1.0, 0.5, 0.25];
//! let xyz = SRGB_TO_XYZ * rgb;
//! let back = XYZ_TO_SRGB * xyz;
//! assert!((back[0] - rgb[0]).abs() < 1e-5);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod mat3;
mod primaries;

pub use adapt::*;
pub use mat3::*;
pub use primaries::*;
