//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Two inputs that must agree in size do not.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffer error from `imgalgo-core`.
    #[error(transparent)]
    Core(#[from] imgalgo_core::Error),
}

impl OpsError {
    /// Returns `true` if two shapes disagreed.
    pub fn is_dimension_error(&self) -> bool {
        match self {
            Self::DimensionMismatch(_) => true,
            Self::Core(e) => e.is_dimension_error(),
            _ => false,
        }
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Checks that `len == width * height * channels`.
pub(crate) fn check_len(len: usize, width: usize, height: usize, channels: usize) -> OpsResult<()> {
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(channels))
        .ok_or_else(|| OpsError::InvalidDimensions("image dimensions overflow".into()))?;
    if len != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {expected} values for {width}x{height}x{channels}, got {len}"
        )));
    }
    Ok(())
}
