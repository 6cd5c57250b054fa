//! Morphology errors

use thiserror::Error;

/// Failure of a structuring-element or dilation operation
#[derive(Debug, Error)]
pub enum MorphError {
    /// Mask construction failed
    #[error(transparent)]
    Core(#[from] breizorro_core::Error),

    /// Malformed structuring element
    #[error("bad structuring element: {0}")]
    InvalidSel(String),
}

/// Shorthand for morphology results
pub type MorphResult<T> = Result<T, MorphError>;
