//! Floating-point images
//!
//! `FPix` is a 2D array of `f32` values. It carries both the restored
//! radio image read from disk and the noise map derived from it.
//!
//! # Examples
//!
//! ```
//! use breizorro_core::FPix;
//!
//! let mut sky = FPix::new(64, 48).unwrap();
//!
//! sky.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(sky.get_pixel(10, 20).unwrap(), 0.5);
//!
//! assert_eq!(sky.max_value(), Some(0.5));
//! assert_eq!(sky.median(), 0.0);
//! ```

use crate::error::{Error, Result, check_buffer_len, pixel_count};

/// Floating-point image
///
/// Row-major, unpadded: column `x` of row `y` is `data[y * width + x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    /// Width in pixels
    pub(crate) width: u32,
    /// Height in pixels
    pub(crate) height: u32,
    /// Pixel values, `width * height` of them
    pub(crate) data: Vec<f32>,
}

impl FPix {
    /// Zero-filled image
    ///
    /// # Errors
    ///
    /// `Error::InvalidDimension` when either side is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Image filled with `value`
    ///
    /// # Errors
    ///
    /// `Error::InvalidDimension` when either side is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use breizorro_core::FPix;
    ///
    /// let fpix = FPix::new_with_value(100, 100, 1.0e-10).unwrap();
    /// assert_eq!(fpix.get_pixel(50, 50).unwrap(), 1.0e-10);
    /// ```
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Ok(FPix {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Wrap a row-major pixel buffer
    ///
    /// # Errors
    ///
    /// `Error::InvalidDimension` when either side is 0, and
    /// `Error::InvalidParameter` when `data` is not `width * height` long.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        check_buffer_len(width, height, data.len())?;
        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Image with `f(x, y)` at every pixel, evaluated row by row
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> f32,
    {
        let mut fpix = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                fpix.set_pixel_unchecked(x, y, f(x, y));
            }
        }
        Ok(fpix)
    }

    /// Number of columns (FITS `NAXIS1`)
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows (FITS `NAXIS2`)
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn checked_index(&self, x: u32, y: u32) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(self.index(x, y))
        } else {
            Err(Error::IndexOutOfBounds {
                index: self.index(x, y),
                len: self.data.len(),
            })
        }
    }

    /// Value at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// `Error::IndexOutOfBounds` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        Ok(self.data[self.checked_index(x, y)?])
    }

    /// Overwrite the value at column `x`, row `y`
    ///
    /// # Errors
    ///
    /// `Error::IndexOutOfBounds` outside the image.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Like [`FPix::get_pixel`] for coordinates already known to be inside
    ///
    /// # Panics
    ///
    /// On coordinates outside the image.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Like [`FPix::set_pixel`] for coordinates already known to be inside
    ///
    /// # Panics
    ///
    /// On coordinates outside the image.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// All pixels, row-major
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// All pixels, row-major, writable
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the image and return its pixel buffer
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Pixels of row `y`
    ///
    /// # Panics
    ///
    /// When `y` is not a row of the image.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let w = self.width as usize;
        &self.data[y as usize * w..(y as usize + 1) * w]
    }

    /// Writable pixels of row `y`
    ///
    /// # Panics
    ///
    /// When `y` is not a row of the image.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [f32] {
        let w = self.width as usize;
        &mut self.data[y as usize * w..(y as usize + 1) * w]
    }

    /// Fill the whole image with `value`
    pub fn set_all(&mut self, value: f32) {
        self.data.fill(value);
    }

    // -- statistics --

    /// Smallest non-NaN value, or `None` if every pixel is NaN
    pub fn min_value(&self) -> Option<f32> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f32::min)
    }

    /// Largest non-NaN value, or `None` if every pixel is NaN
    pub fn max_value(&self) -> Option<f32> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f32::max)
    }

    /// Median of all pixel values
    ///
    /// For an even pixel count this is the mean of the two middle values.
    /// Values are ordered with `f32::total_cmp`, so NaNs sort last.
    pub fn median(&self) -> f32 {
        let mut values = self.data.clone();
        let n = values.len();
        let mid = n / 2;

        let (lower, upper, _) = values.select_nth_unstable_by(mid, f32::total_cmp);
        let upper = *upper;
        if n % 2 == 1 {
            return upper;
        }

        // Largest value of the lower half is the other middle element
        let lower_max = lower
            .iter()
            .copied()
            .max_by(f32::total_cmp)
            .unwrap_or(upper);
        (lower_max + upper) / 2.0
    }
}
