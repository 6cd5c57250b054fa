//! Local noise estimation
//!
//! Builds a per-pixel noise map from a sliding-window minimum:
//!
//! 1. `window_min = min_filter(image, boxsize, boxsize)`
//! 2. `noise = -window_min / ratio(boxsize^2)`
//! 3. non-positive values are raised to [`NOISE_FLOOR`]
//! 4. values below the global median are raised to the median
//!
//! On a noise-dominated image the median of `-window_min` equals
//! `ratio * sigma`, so the map reads directly in units of sigma.

use crate::calibrate::calibration_ratio;
use crate::rank::min_filter;
use crate::{FilterError, FilterResult};
use breizorro_core::FPix;

/// Replacement for non-positive noise estimates
pub const NOISE_FLOOR: f32 = 1.0e-10;

/// Noise map together with the median used for clamping
#[derive(Debug, Clone)]
pub struct NoiseEstimate {
    /// Per-pixel noise, same shape as the input image
    pub noise: FPix,
    /// Median of the floored noise map; every pixel of `noise` is at least this
    pub median_noise: f32,
}

/// Estimate the local noise of `image` over `boxsize` x `boxsize` windows.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `boxsize < 2`.
///
/// # Examples
///
/// ```
/// use breizorro_core::FPix;
/// use breizorro_filter::{NOISE_FLOOR, estimate_noise};
///
/// let image = FPix::new(5, 5).unwrap();
/// let est = estimate_noise(&image, 3).unwrap();
/// assert_eq!(est.median_noise, NOISE_FLOOR);
/// ```
pub fn estimate_noise(image: &FPix, boxsize: u32) -> FilterResult<NoiseEstimate> {
    let ratio = calibration_ratio(boxsize)?;
    estimate_noise_with_ratio(image, boxsize, ratio)
}

/// Same as [`estimate_noise`] with a precomputed calibration ratio.
///
/// Useful together with [`crate::CalibrationCache`] when many images share
/// one box size.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `boxsize` is 0 or `ratio`
/// is not a positive finite number.
pub fn estimate_noise_with_ratio(
    image: &FPix,
    boxsize: u32,
    ratio: f64,
) -> FilterResult<NoiseEstimate> {
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "calibration ratio must be positive, got {}",
            ratio
        )));
    }

    let mut noise = min_filter(image, boxsize, boxsize)?;
    let ratio = ratio as f32;

    for v in noise.data_mut() {
        let n = -*v / ratio;
        // `!(n > 0)` also catches -0.0 from all-zero windows
        *v = if n > 0.0 { n } else { NOISE_FLOOR };
    }

    let median_noise = noise.median();
    for v in noise.data_mut() {
        if *v < median_noise {
            *v = median_noise;
        }
    }

    Ok(NoiseEstimate {
        noise,
        median_noise,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_image_hits_floor() {
        let image = FPix::new(5, 5).unwrap();
        let est = estimate_noise(&image, 3).unwrap();
        assert_eq!(est.median_noise, NOISE_FLOOR);
        assert!(est.noise.data().iter().all(|&v| v == NOISE_FLOOR));
    }

    #[test]
    fn test_positive_only_image_hits_floor() {
        let image = FPix::from_fn(6, 6, |x, y| 1.0 + (x + y) as f32).unwrap();
        let est = estimate_noise(&image, 3).unwrap();
        assert!(est.noise.data().iter().all(|&v| v == NOISE_FLOOR));
    }

    #[test]
    fn test_negative_constant_image() {
        let ratio = calibration_ratio(3).unwrap() as f32;
        let image = FPix::new_with_value(4, 4, -2.0).unwrap();
        let est = estimate_noise(&image, 3).unwrap();
        let expected = 2.0 / ratio;
        assert!(est.noise.data().iter().all(|&v| v == expected));
        assert_eq!(est.median_noise, expected);
    }

    #[test]
    fn test_median_clamp() {
        // One deep negative pixel raises the noise only in its neighborhood;
        // the rest sits at the floor and the median stays at the floor.
        let image = FPix::from_fn(9, 9, |x, y| if x == 4 && y == 4 { -10.0 } else { 0.0 }).unwrap();
        let est = estimate_noise(&image, 3).unwrap();
        assert_eq!(est.median_noise, NOISE_FLOOR);
        let center = est.noise.get_pixel(4, 4).unwrap();
        assert!(center > 1.0);
        assert_eq!(est.noise.get_pixel(0, 0).unwrap(), NOISE_FLOOR);
    }

    #[test]
    fn test_invariants_on_mixed_image() {
        let image = FPix::from_fn(12, 10, |x, y| ((x * 7 + y * 13) % 11) as f32 - 5.0).unwrap();
        let est = estimate_noise(&image, 4).unwrap();
        for &v in est.noise.data() {
            assert!(v > 0.0);
            assert!(v >= est.median_noise);
        }
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let image = FPix::new(3, 3).unwrap();
        assert!(estimate_noise_with_ratio(&image, 3, 0.0).is_err());
        assert!(estimate_noise_with_ratio(&image, 3, f64::NAN).is_err());
        assert!(estimate_noise(&image, 1).is_err());
    }
}
