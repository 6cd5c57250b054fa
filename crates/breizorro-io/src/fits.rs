//! FITS primary HDU support
//!
//! Only the first 2-D plane of the primary array is read or written. For
//! cubes with NAXIS >= 3 that is `data[0, .., 0, :, :]`, i.e. the first
//! `NAXIS1 * NAXIS2` samples of the data unit.
//!
//! cfitsio applies BSCALE/BZERO on both paths. It does not map BLANK when
//! no null value is requested, so that is done here from the header keys.

use crate::{IoError, IoResult};
use breizorro_core::{FPix, Mask};
use fitsio::FitsFile;
use fitsio::hdu::{FitsHdu, HduInfo};
use fitsio::images::{ImageDescription, ImageType};
use std::fs;
use std::path::Path;

fn fits_error(path: &Path) -> impl FnOnce(fitsio::errors::Error) -> IoError + '_ {
    move |source| IoError::Fits {
        path: path.to_path_buf(),
        source,
    }
}

fn read_key_optional<T: fitsio::headers::ReadsKey>(
    hdu: &FitsHdu,
    fptr: &mut FitsFile,
    key: &str,
) -> Option<T> {
    hdu.read_key(fptr, key).ok()
}

/// Layout and scaling of the primary data array
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayout {
    /// `BITPIX` of the stored samples
    pub bitpix: i64,
    /// Axis lengths as cfitsio reports them, slowest first (`[.., NAXIS2, NAXIS1]`)
    pub shape: Vec<usize>,
    /// Physical = bzero + bscale * stored
    pub bscale: f64,
    /// Physical = bzero + bscale * stored
    pub bzero: f64,
    /// Stored integer that marks an undefined pixel
    pub blank: Option<i64>,
}

impl ImageLayout {
    /// Read the layout of the primary HDU.
    ///
    /// # Errors
    ///
    /// `IoError::NoData` if the HDU is not an image, has fewer than two
    /// axes or has a zero-length axis.
    fn from_hdu(hdu: &FitsHdu, fptr: &mut FitsFile) -> IoResult<Self> {
        let shape = match &hdu.info {
            HduInfo::ImageInfo { shape, .. } => shape.clone(),
            _ => return Err(IoError::NoData("primary HDU is not an image".to_string())),
        };
        if shape.len() < 2 {
            return Err(IoError::NoData(format!(
                "NAXIS = {}, need at least 2 axes",
                shape.len()
            )));
        }
        if shape.contains(&0) {
            return Err(IoError::NoData(format!("zero-length axis in {:?}", shape)));
        }

        Ok(ImageLayout {
            bitpix: read_key_optional(hdu, fptr, "BITPIX").unwrap_or(-32),
            shape,
            bscale: read_key_optional(hdu, fptr, "BSCALE").unwrap_or(1.0),
            bzero: read_key_optional(hdu, fptr, "BZERO").unwrap_or(0.0),
            blank: read_key_optional(hdu, fptr, "BLANK"),
        })
    }

    /// Plane size as (width, height) = (NAXIS1, NAXIS2)
    pub fn plane_dimensions(&self) -> (u32, u32) {
        let n = self.shape.len();
        (self.shape[n - 1] as u32, self.shape[n - 2] as u32)
    }

    /// Number of samples in the first plane
    pub fn plane_len(&self) -> usize {
        let (w, h) = self.plane_dimensions();
        w as usize * h as usize
    }

    /// Whether samples are stored as integers (and so subject to BLANK)
    pub fn is_integer(&self) -> bool {
        self.bitpix > 0
    }

    fn physical(&self, stored: f64) -> f64 {
        self.bzero + self.bscale * stored
    }

    /// Stored integer range for this BITPIX
    fn stored_range(&self) -> Option<(f64, f64)> {
        match self.bitpix {
            8 => Some((0.0, u8::MAX as f64)),
            16 => Some((i16::MIN as f64, i16::MAX as f64)),
            32 => Some((i32::MIN as f64, i32::MAX as f64)),
            64 => Some((i64::MIN as f64, i64::MAX as f64)),
            _ => None,
        }
    }

    /// Physical value that cfitsio returns for a BLANK sample
    fn blank_value(&self) -> Option<f32> {
        self.blank
            .filter(|_| self.is_integer())
            .map(|b| self.physical(b as f64) as f32)
    }

    /// Turn samples read through cfitsio into pixel values
    fn decode(&self, mut samples: Vec<f32>) -> Vec<f32> {
        if let Some(blank) = self.blank_value() {
            for v in samples.iter_mut().filter(|v| **v == blank) {
                *v = f32::NAN;
            }
        }
        samples
    }

    /// Turn pixel values into samples cfitsio can store without overflow.
    ///
    /// Integer types saturate at the physical range of BITPIX, and NaN
    /// becomes BLANK when the header defines one, stored zero otherwise.
    /// cfitsio rounds to nearest on the way out.
    fn encode(&self, pixels: &[f32]) -> Vec<f64> {
        let Some((lo, hi)) = self.stored_range() else {
            return pixels.iter().map(|&v| v as f64).collect();
        };
        let (a, b) = (self.physical(lo), self.physical(hi));
        let (lo, hi) = (a.min(b), a.max(b));
        let null = self.physical(self.blank.map_or(0.0, |b| b as f64));
        pixels
            .iter()
            .map(|&v| if v.is_nan() { null } else { (v as f64).clamp(lo, hi) })
            .collect()
    }
}

/// First plane of a FITS file with the layout it came from
#[derive(Debug, Clone)]
pub struct FitsPlane {
    /// Physical pixel values, NAXIS1 wide and NAXIS2 high
    pub image: FPix,
    /// Primary array layout
    pub layout: ImageLayout,
}

/// Read the first image plane of a FITS file
///
/// # Errors
///
/// - `IoError::Fits` if cfitsio cannot open or read the file
/// - `IoError::NoData` if the primary HDU has no 2-D array
pub fn read_fits_plane<P: AsRef<Path>>(path: P) -> IoResult<FitsPlane> {
    let path = path.as_ref();
    let mut fptr = FitsFile::open(path).map_err(fits_error(path))?;
    let hdu = fptr.primary_hdu().map_err(fits_error(path))?;
    let layout = ImageLayout::from_hdu(&hdu, &mut fptr)?;

    let samples: Vec<f32> = hdu
        .read_section(&mut fptr, 0, layout.plane_len())
        .map_err(fits_error(path))?;
    let (width, height) = layout.plane_dimensions();
    let image = FPix::from_data(width, height, layout.decode(samples))?;

    log::debug!(
        "read {}: {}x{} plane, BITPIX {}",
        path.display(),
        width,
        height,
        layout.bitpix
    );
    Ok(FitsPlane { image, layout })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Copy `src` to `dst`, replacing the first plane's data with `image`.
///
/// The header and any later planes are carried over by the copy; only the
/// first `NAXIS1 * NAXIS2` samples are rewritten, using the source BITPIX
/// and inverse BSCALE/BZERO.
///
/// # Errors
///
/// `IoError::ShapeMismatch` if `image` is not NAXIS1 x NAXIS2. Nothing is
/// written in that case.
pub fn write_fits_plane<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst: Q,
    image: &FPix,
) -> IoResult<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());

    let layout = {
        let mut fptr = FitsFile::open(src).map_err(fits_error(src))?;
        let hdu = fptr.primary_hdu().map_err(fits_error(src))?;
        ImageLayout::from_hdu(&hdu, &mut fptr)?
    };
    if layout.plane_dimensions() != image.dimensions() {
        return Err(IoError::ShapeMismatch {
            expected: layout.plane_dimensions(),
            actual: image.dimensions(),
        });
    }

    if !same_file(src, dst) {
        fs::copy(src, dst)?;
    }
    let mut fptr = FitsFile::edit(dst).map_err(fits_error(dst))?;
    let hdu = fptr.primary_hdu().map_err(fits_error(dst))?;
    hdu.write_section(&mut fptr, 0, layout.plane_len(), &layout.encode(image.data()))
        .map_err(fits_error(dst))?;

    log::debug!(
        "wrote {} ({}x{} plane from {})",
        dst.display(),
        image.width(),
        image.height(),
        src.display()
    );
    Ok(())
}

/// Copy `src` to `dst` with the first plane replaced by `mask` as 1/0
pub fn write_mask_plane<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst: Q,
    mask: &Mask,
) -> IoResult<()> {
    write_fits_plane(src, dst, &mask.to_fpix())
}

/// Write `image` to a new single-HDU BITPIX -32 file at `path`
///
/// An existing file at `path` is replaced.
pub fn write_fits<P: AsRef<Path>>(path: P, image: &FPix) -> IoResult<()> {
    let path = path.as_ref();
    // cfitsio refuses to create over an existing file
    if path.exists() {
        fs::remove_file(path)?;
    }

    let description = ImageDescription {
        data_type: ImageType::Float,
        dimensions: &[image.height() as usize, image.width() as usize],
    };
    let mut fptr = FitsFile::create(path)
        .with_custom_primary(&description)
        .open()
        .map_err(fits_error(path))?;
    let hdu = fptr.primary_hdu().map_err(fits_error(path))?;
    hdu.write_image(&mut fptr, image.data())
        .map_err(fits_error(path))?;
    Ok(())
}
