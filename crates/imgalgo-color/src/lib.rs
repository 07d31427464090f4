//! # imgalgo-color
//!
//! Color-space math and conversion dispatch for [`ImageBuf`] buffers.
//!
//! - [`colormath`] - Per-pixel RGB/XYZ/LAB conversions
//! - [`transfer`] - sRGB transfer curve
//! - [`graph`] - Conversion graph and [`Conversion`] resolution
//! - [`convert`] - Whole-image dispatch ([`colorconvert`] and friends)
//!
//! # Architecture
//!
//! ```text
//!            imgalgo-color
//!                  |
//!       +----------+----------+
//!       |                     |
//!  imgalgo-math          imgalgo-core
//!  (Mat3, primaries)     (ImageBuf, parallel)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use imgalgo_core::{ColorSpace, ImageBuf};
//! use imgalgo_color::{colorconvert, colorconvert_into};
//!
//! let src = ImageBuf::filled(16, 16, &[0.18, 0.18, 0.18]);
//! let lab = colorconvert_into(&src, ColorSpace::Linear, ColorSpace::Lab).unwrap();
//! assert!(lab.pixel(0, 0)[1].abs() < 1e-3);
//!
//! let mut back = lab.clone();
//! colorconvert(&mut back, ColorSpace::Lab, ColorSpace::Linear).unwrap();
//! assert!((back.pixel(0, 0)[0] - 0.18).abs() < 1e-4);
//! ```
//!
//! [`ImageBuf`]: imgalgo_core::ImageBuf

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colormath;
pub mod convert;
pub mod error;
pub mod graph;
pub mod transfer;

pub use convert::{
    colorconvert, colorconvert_into, colorconvert_named, colorconvert_names, colorconvert_pixels,
    colorconvert_to, colorconvert_with, convert_pixel,
};
pub use error::{ColorError, ColorResult};
pub use graph::{Conversion, Step};
