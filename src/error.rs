//! Error types for host-side validation and kernel launches.

use thiserror::Error;

/// Errors reported before (or while) dispatching a pass.
///
/// The kernel itself never fails: a bad parameter that slips past validation
/// shows up as inf/NaN in the output, not as an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PassError {
    /// Result rectangle has a non-positive width or height.
    #[error("empty result rectangle: {0}")]
    EmptyRect(String),

    /// Magnitude scale is zero or not finite.
    #[error("invalid magnitude scale: {0}")]
    InvalidMagnitudeScale(f32),

    /// Buffer length does not match the declared dimensions.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Work-group shape is not usable for a dispatch.
    #[error("invalid work-group shape: {0}")]
    InvalidGroupShape(String),

    /// The compute runtime refused the launch.
    #[error("kernel launch failed: {0}")]
    Launch(String),
}

/// Result type for pass operations.
pub type PassResult<T> = Result<T, PassError>;
