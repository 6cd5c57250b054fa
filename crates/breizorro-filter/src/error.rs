//! Noise and threshold errors

use thiserror::Error;

/// Failure of a filtering, calibration or threshold step
#[derive(Debug, Error)]
pub enum FilterError {
    /// Image construction failed
    #[error(transparent)]
    Core(#[from] breizorro_core::Error),

    /// Rejected argument such as a box size below 2
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Shorthand for filter results
pub type FilterResult<T> = Result<T, FilterError>;
