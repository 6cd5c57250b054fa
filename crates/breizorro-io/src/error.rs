//! FITS reading and writing errors

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or write a FITS file
#[derive(Error, Debug)]
pub enum IoError {
    /// Copying or replacing a file failed
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),

    /// cfitsio rejected the file or the operation
    #[error("FITS error in '{path}': {source}")]
    Fits {
        path: PathBuf,
        source: fitsio::errors::Error,
    },

    /// The primary HDU carries no 2-D image
    #[error("no image data: {0}")]
    NoData(String),

    /// The array to write does not match the plane in the file
    #[error("shape mismatch: file plane is {expected:?}, image is {actual:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Image construction failed
    #[error(transparent)]
    Core(#[from] breizorro_core::Error),
}

/// Shorthand for FITS I/O results
pub type IoResult<T> = Result<T, IoError>;
