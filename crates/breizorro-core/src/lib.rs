//! breizorro Core - Basic data structures for noise-based masking
//!
//! This crate provides the data structures shared by every stage of the
//! masking pipeline:
//!
//! - [`FPix`] - Floating-point image (input intensities and noise maps)
//! - [`Mask`] - Binary image (region-of-interest masks)
//! - [`ConnectivityType`] - Pixel adjacency used by morphology and fills
//!
//! All images are stored row-major with no padding. Pixel `(x, y)` lives at
//! index `y * width + x`; `x` runs along the FITS `NAXIS1` axis.

pub mod connectivity;
pub mod error;
pub mod fpix;
pub mod mask;

pub use connectivity::ConnectivityType;
pub use error::{Error, Result, check_same_size};
pub use fpix::FPix;
pub use mask::Mask;
