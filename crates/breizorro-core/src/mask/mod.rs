//! Binary masks
//!
//! A `Mask` holds one boolean per pixel. `true` marks a pixel inside the
//! region of interest (foreground), `false` marks background.
//!
//! # Examples
//!
//! ```
//! use breizorro_core::Mask;
//!
//! let mut mask = Mask::new(8, 8).unwrap();
//! mask.set(3, 4, true).unwrap();
//! assert!(mask.get(3, 4).unwrap());
//! assert_eq!(mask.count(), 1);
//! ```

use crate::error::{Error, Result, check_buffer_len, check_same_size, pixel_count};
use crate::fpix::FPix;

/// Binary image
///
/// Same row-major layout as [`FPix`]: pixel (x, y) is at `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// All-background mask
    ///
    /// # Errors
    ///
    /// `Error::InvalidDimension` when either side is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Ok(Mask {
            width,
            height,
            data: vec![false; len],
        })
    }

    /// Wrap a row-major buffer of flags
    pub fn from_data(width: u32, height: u32, data: Vec<bool>) -> Result<Self> {
        check_buffer_len(width, height, data.len())?;
        Ok(Mask {
            width,
            height,
            data,
        })
    }

    /// Create a mask by evaluating `f(x, y)` at every pixel
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut mask = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                mask.set_unchecked(x, y, f(x, y));
            }
        }
        Ok(mask)
    }

    /// Mask of the non-zero pixels of `fpix`
    ///
    /// NaN counts as zero.
    pub fn from_fpix_nonzero(fpix: &FPix) -> Self {
        Mask {
            width: fpix.width(),
            height: fpix.height(),
            data: fpix.data().iter().map(|&v| v != 0.0 && !v.is_nan()).collect(),
        }
    }

    /// Convert to a floating-point image with `true -> 1.0`, `false -> 0.0`
    pub fn to_fpix(&self) -> FPix {
        FPix {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
        }
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`, always equal to the source image's
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Flat index of `(x, y)`, or `IndexOutOfBounds` outside the mask
    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        let idx = self.index(x, y);
        if x < self.width && y < self.height {
            Ok(idx)
        } else {
            Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            })
        }
    }

    /// Flag at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// `Error::IndexOutOfBounds` outside the mask.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<bool> {
        Ok(self.data[self.checked_index(x, y)?])
    }

    /// Overwrite the flag at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// `Error::IndexOutOfBounds` outside the mask.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Like [`Mask::get`] for coordinates already known to be inside
    ///
    /// # Panics
    ///
    /// On coordinates outside the mask.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> bool {
        self.data[self.index(x, y)]
    }

    /// Like [`Mask::set`] for coordinates already known to be inside
    ///
    /// # Panics
    ///
    /// On coordinates outside the mask.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: bool) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Value at signed coordinates; anything outside the image is `false`
    #[inline]
    pub fn get_or_false(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.get_unchecked(x as u32, y as u32)
    }

    /// All flags, row-major
    #[inline]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// All flags, row-major, writable
    #[inline]
    pub fn data_mut(&mut self) -> &mut [bool] {
        &mut self.data
    }

    /// Flags of row `y`
    ///
    /// # Panics
    ///
    /// When `y` is not a row of the mask.
    #[inline]
    pub fn row(&self, y: u32) -> &[bool] {
        let w = self.width as usize;
        &self.data[y as usize * w..(y as usize + 1) * w]
    }

    /// Set every pixel to `value`
    pub fn set_all(&mut self, value: bool) {
        self.data.fill(value);
    }

    /// Number of foreground (`true`) pixels
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Whether every foreground pixel of `self` is also foreground in `other`
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the masks differ in size.
    pub fn is_subset_of(&self, other: &Mask) -> Result<bool> {
        check_same_size(self.dimensions(), other.dimensions())?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| !a || b))
    }

    /// In-place union: `self |= other`
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the masks differ in size.
    pub fn or_assign(&mut self, other: &Mask) -> Result<()> {
        check_same_size(self.dimensions(), other.dimensions())?;
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            *a |= b;
        }
        Ok(())
    }
}
