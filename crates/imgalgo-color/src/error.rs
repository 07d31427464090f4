//! Error types for color operations.

use imgalgo_core::ColorSpace;
use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// No path between two spaces in the conversion graph.
    #[error("unsupported conversion: {from} -> {to}")]
    UnsupportedConversion {
        /// Source color space.
        from: ColorSpace,
        /// Target color space.
        to: ColorSpace,
    },

    /// Buffer shape, channel or color-space name error.
    #[error(transparent)]
    Image(#[from] imgalgo_core::Error),
}

impl ColorError {
    /// Returns `true` if a name or conversion could not be resolved.
    pub fn is_color_space_error(&self) -> bool {
        match self {
            Self::UnsupportedConversion { .. } => true,
            Self::Image(e) => e.is_color_space_error(),
        }
    }

    /// Returns `true` if two buffer shapes disagreed.
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, Self::Image(e) if e.is_dimension_error())
    }

    /// Returns `true` if a buffer had the wrong channel count.
    pub fn is_channel_error(&self) -> bool {
        matches!(self, Self::Image(imgalgo_core::Error::ChannelMismatch { .. }))
    }
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
