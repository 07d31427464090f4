//! Error types for imgalgo-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of buffer construction,
//! buffer-to-buffer operations and color-space name resolution. Every check
//! that can produce one of these errors runs before the first pixel is
//! written, so a failed call never leaves a buffer half-processed.
//!
//! # Usage
//!
//! ```rust
//! use imgalgo_core::{Error, Result};
//!
//! fn same_size(a: (u32, u32), b: (u32, u32)) -> Result<()> {
//!     if a != b {
//!         return Err(Error::dimension_mismatch(a, b));
//!     }
//!     Ok(())
//! }
//!
//! assert!(same_size((4, 4), (4, 4)).is_ok());
//! assert!(same_size((4, 4), (8, 4)).unwrap_err().is_dimension_error());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in core buffer and color-space operations.
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Shape errors**: [`DimensionMismatch`](Error::DimensionMismatch),
///   [`InvalidDimensions`](Error::InvalidDimensions),
///   [`ChannelMismatch`](Error::ChannelMismatch)
/// - **Color errors**: [`UnsupportedColorSpace`](Error::UnsupportedColorSpace)
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Two buffers that must share a shape do not.
    ///
    /// Returned by copy-transforms (source vs destination) and by hole
    /// filling (color buffer vs validity mask).
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgalgo_core::Error;
    ///
    /// let err = Error::dimension_mismatch((640, 480), (320, 240));
    /// assert!(err.to_string().contains("640x480"));
    /// ```
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Buffer dimensions or data length are inconsistent.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count does not satisfy the operation.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: usize,
        /// Actual channel count
        got: usize,
    },

    /// Color-space name is not part of the recognized set.
    #[error("unsupported color space: {name}")]
    UnsupportedColorSpace {
        /// The name that failed to resolve
        name: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Creates an [`Error::UnsupportedColorSpace`] error.
    #[inline]
    pub fn unsupported_color_space(name: impl Into<String>) -> Self {
        Self::UnsupportedColorSpace { name: name.into() }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if two shapes disagreed.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }

    /// Returns `true` if a color-space name failed to resolve.
    #[inline]
    pub fn is_color_space_error(&self) -> bool {
        matches!(self, Self::UnsupportedColorSpace { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((100, 100), (200, 200));
        let msg = err.to_string();
        assert!(msg.contains("100x100"));
        assert!(msg.contains("200x200"));
        assert!(err.is_dimension_error());
        assert!(!err.is_bounds_error());
    }

    #[test]
    fn test_unsupported_color_space() {
        let err = Error::unsupported_color_space("Rec.2100-PQ");
        assert!(err.to_string().contains("Rec.2100-PQ"));
        assert!(err.is_color_space_error());
    }

    #[test]
    fn test_channel_mismatch() {
        let err = Error::channel_mismatch(3, 1);
        assert_eq!(err.to_string(), "channel mismatch: expected 3, got 1");
    }
}
