//! Noise-relative thresholding
//!
//! A pixel is kept when its intensity exceeds `threshold` times the local
//! noise. NaN pixels never pass.

use crate::{FilterError, FilterResult};
use breizorro_core::{FPix, Mask, check_same_size};

/// Raw detection mask: `image > threshold * noise`, pixel by pixel.
///
/// # Errors
///
/// - `FilterError::InvalidParameters` if `threshold` is not a positive
///   finite number. A non-positive threshold would pass every positive
///   pixel regardless of the noise.
/// - `FilterError::Core(DimensionMismatch)` if `noise` and `image` differ
///   in size.
pub fn threshold_mask(image: &FPix, noise: &FPix, threshold: f32) -> FilterResult<Mask> {
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "threshold must be positive, got {}",
            threshold
        )));
    }
    check_same_size(image.dimensions(), noise.dimensions())?;

    let data = image
        .data()
        .iter()
        .zip(noise.data())
        .map(|(&v, &n)| v > threshold * n)
        .collect();
    Ok(Mask::from_data(image.width(), image.height(), data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_basic() {
        let image = FPix::from_data(4, 1, vec![0.5, 2.0, 3.0, f32::NAN]).unwrap();
        let noise = FPix::new_with_value(4, 1, 1.0).unwrap();
        let mask = threshold_mask(&image, &noise, 2.0).unwrap();
        // Strict comparison: 2.0 is not above 2 * 1.0
        assert_eq!(mask.data(), &[false, false, true, false]);
    }

    #[test]
    fn test_threshold_monotone() {
        let image = FPix::from_fn(8, 8, |x, y| (x * y) as f32).unwrap();
        let noise = FPix::from_fn(8, 8, |x, _| 1.0 + x as f32 * 0.1).unwrap();
        let loose = threshold_mask(&image, &noise, 1.0).unwrap();
        let strict = threshold_mask(&image, &noise, 5.0).unwrap();
        assert!(strict.is_subset_of(&loose).unwrap());
        assert!(strict.count() < loose.count());
    }

    #[test]
    fn test_threshold_rejects_non_positive() {
        let image = FPix::new(2, 2).unwrap();
        let noise = FPix::new_with_value(2, 2, 1.0).unwrap();
        assert!(threshold_mask(&image, &noise, 0.0).is_err());
        assert!(threshold_mask(&image, &noise, -1.0).is_err());
        assert!(threshold_mask(&image, &noise, f32::INFINITY).is_err());
    }

    #[test]
    fn test_threshold_shape_mismatch() {
        let image = FPix::new(2, 2).unwrap();
        let noise = FPix::new_with_value(3, 2, 1.0).unwrap();
        assert!(matches!(
            threshold_mask(&image, &noise, 1.0),
            Err(FilterError::Core(
                breizorro_core::Error::DimensionMismatch { .. }
            ))
        ));
    }
}
