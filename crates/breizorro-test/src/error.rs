//! Failures of the regression helpers themselves

use thiserror::Error;

/// A helper could not do its job, independent of any check result
#[derive(Debug, Error)]
pub enum TestError {
    /// A display-mode dump could not be written
    #[error("cannot dump {path}: {message}")]
    ImageWrite { path: String, message: String },
}

/// Shorthand for helper results
pub type TestResult<T> = Result<T, TestError>;
