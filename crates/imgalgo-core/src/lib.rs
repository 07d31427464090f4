//! # imgalgo-core
//!
//! Core types for the imgalgo image-algorithm crates.
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`ImageBuf`] - Interleaved `f32` pixel buffer with fixed dimensions
//! - [`PixelMut`] - Mutable view of one pixel handed to pixel functions
//! - [`ColorSpace`] - Closed set of recognized color spaces and their names
//! - [`parallel`] - Chunked, row-parallel pixel processing
//! - [`Error`] - Shared error type
//!
//! ## Crate Structure
//!
//! ```text
//! imgalgo-core (this crate)
//!    ^
//!    |
//!    +-- imgalgo-color (color math, conversion dispatch)
//!    +-- imgalgo-ops (hole filling, resize, convolution)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use imgalgo_core::{ImageBuf, parallel};
//!
//! let mut img = ImageBuf::filled(64, 64, &[0.25, 0.5, 1.0]);
//! parallel::process_image(&mut img, |px| {
//!     for c in px.channels_mut() {
//!         *c *= 2.0;
//!     }
//! });
//! assert_eq!(img.pixel(10, 10), &[0.5f32, 1.0, 2.0][..]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod error;
pub mod image;
pub mod parallel;
pub mod pixel;

// Re-exports for convenience
pub use colorspace::ColorSpace;
pub use error::{Error, Result};
pub use image::ImageBuf;
pub use parallel::{Chunk, ProcessOptions};
pub use pixel::PixelMut;

/// Prelude module for convenient imports.
///
/// ```
/// use imgalgo_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colorspace::ColorSpace;
    pub use crate::error::{Error, Result};
    pub use crate::image::ImageBuf;
    pub use crate::parallel::{process_image, process_image_copy, process_image_to, ProcessOptions};
    pub use crate::pixel::PixelMut;
}
