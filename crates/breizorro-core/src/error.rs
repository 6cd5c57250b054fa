//! Errors raised by image and mask containers

use thiserror::Error;

/// Container error
#[derive(Error, Debug)]
pub enum Error {
    /// An image side was zero
    #[error("image must not be empty, got {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel outside the image
    #[error("pixel {index} outside an image of {len} pixels")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two images that must align differ in shape
    #[error("shape {}x{} does not match {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Rejected argument
    #[error("invalid argument: {0}")]
    InvalidParameter(String),
}

/// Result of a container operation
pub type Result<T> = std::result::Result<T, Error>;

/// Check that two images share the same `(width, height)`.
///
/// Returns `Error::DimensionMismatch` otherwise, with `expected` taken
/// from the first argument.
pub fn check_same_size(expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Number of pixels in a `width` x `height` image, rejecting empty shapes.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize> {
    match width as usize * height as usize {
        0 => Err(Error::InvalidDimension { width, height }),
        n => Ok(n),
    }
}

/// Check that a buffer holds exactly one value per pixel.
pub(crate) fn check_buffer_len(width: u32, height: u32, len: usize) -> Result<()> {
    if pixel_count(width, height)? != len {
        return Err(Error::InvalidParameter(format!(
            "{} pixel values for a {}x{} image",
            len, width, height
        )));
    }
    Ok(())
}
