//! # imgalgo-ops
//!
//! Whole-image operations for photogrammetry texture pipelines.
//!
//! # Modules
//!
//! - [`holes`] - Hole filling by confidence-weighted propagation
//! - [`pushpull`] - Pyramid hole filling driven by an alpha channel
//! - [`resize`] - Integer downscaling with separable filters
//! - [`filter`] - Convolution with named kernels
//! - [`transpose`] - Buffer transposition
//!
//! All operations process rows in parallel on the current rayon pool.
//!
//! # Example
//!
//! ```rust
//! use imgalgo_core::ImageBuf;
//! use imgalgo_ops::{fill_holes, resize_image, Filter, ResizeOptions};
//!
//! let mut img = ImageBuf::filled(32, 32, &[0.2, 0.4, 0.6]);
//! let mut mask = vec![1.0; 32 * 32];
//! for i in 0..32 {
//!     mask[16 * 32 + i] = 0.0;
//!     img.set_pixel(i as u32, 16, &[0.0, 0.0, 0.0]);
//! }
//!
//! let stats = fill_holes(&mut img, &mask).unwrap();
//! assert!(stats.is_complete());
//!
//! let thumb = resize_image(&img, 4, &ResizeOptions::new(Filter::Mitchell)).unwrap();
//! assert_eq!(thumb.dimensions(), (8, 8));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod holes;
pub mod pushpull;
pub mod resize;
pub mod transpose;

pub use error::{OpsError, OpsResult};
pub use filter::{convolve_buffer, convolve_image, make_kernel, Kernel};
pub use holes::{
    fill_holes, fill_holes_rgb, fill_holes_rgb_with, fill_holes_with, Connectivity, FillHolesOptions, FillStats,
};
pub use pushpull::{count_holes, fill_holes_pushpull, has_holes, PushPullOptions};
pub use resize::{resize_buffer, resize_image, Filter, ResizeOptions};
pub use transpose::{transpose_buffer, transpose_image};
