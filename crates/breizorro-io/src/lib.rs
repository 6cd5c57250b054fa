//! breizorro-io - FITS image I/O for breizorro
//!
//! Reads the first 2-D plane of a FITS primary HDU into an [`FPix`] and
//! writes arrays of the same shape back into a copy of the source file,
//! on top of cfitsio through the `fitsio` crate.
//!
//! - [`read_fits_plane`] returns physical values (BSCALE/BZERO applied,
//!   BLANK as NaN)
//! - [`write_fits_plane`] / [`write_mask_plane`] keep the source header
//!   and replace only the plane data
//! - [`write_fits`] creates a fresh single-HDU float file
//!
//! [`FPix`]: breizorro_core::FPix

pub mod error;
pub mod fits;

pub use error::{IoError, IoResult};
pub use fits::{
    FitsPlane, ImageLayout, read_fits_plane, write_fits, write_fits_plane, write_mask_plane,
};
