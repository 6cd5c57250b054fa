//! Order-statistic calibration
//!
//! The minimum of `n` samples of zero-mean Gaussian noise with standard
//! deviation `sigma` has a median of `-ratio(n) * sigma`. Dividing a
//! windowed minimum by `-ratio(n)` therefore gives a noise estimate.
//!
//! `ratio(n)` is found by tabulating the CDF of the minimum of `n`
//! standard-normal draws on a fixed grid and inverting it at 0.5 by linear
//! interpolation. The grid and interpolation rule are fixed so the ratio
//! is reproducible bit for bit.

use crate::{FilterError, FilterResult};
use std::collections::HashMap;

/// Number of grid samples used to tabulate the CDF
pub const GRID_POINTS: usize = 1000;

/// Grid spans `[-GRID_LIMIT, GRID_LIMIT]` in units of sigma
pub const GRID_LIMIT: f64 = 10.0;

/// `GRID_POINTS` evenly spaced values from `-GRID_LIMIT` to `GRID_LIMIT`
/// inclusive. The last sample is pinned to the end point.
fn grid() -> Vec<f64> {
    let step = 2.0 * GRID_LIMIT / (GRID_POINTS - 1) as f64;
    let mut xs: Vec<f64> = (0..GRID_POINTS)
        .map(|k| -GRID_LIMIT + k as f64 * step)
        .collect();
    xs[GRID_POINTS - 1] = GRID_LIMIT;
    xs
}

/// Standard normal cumulative distribution function
#[inline]
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
}

/// Piecewise-linear interpolation of `x` over the table `(xp, fp)`.
///
/// `xp` must be non-decreasing. Below the table the first `fp` is
/// returned, at or above the last sample the last `fp`. Otherwise the
/// segment starts at the largest `j` with `xp[j] <= x`.
fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let last = xp.len() - 1;
    if x < xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    let j = xp.partition_point(|&v| v <= x) - 1;
    let slope = (fp[j + 1] - fp[j]) / (xp[j + 1] - xp[j]);
    slope * (x - xp[j]) + fp[j]
}

/// Calibration ratio for a window of `n` pixels.
///
/// Returns `|x*|` where `F(x*) = 0.5` and `F(x) = 1 - (1 - Phi(x))^n` is
/// the CDF of the minimum of `n` standard-normal draws.
pub fn order_statistic_ratio(n: f64) -> f64 {
    let xs = grid();
    let cdf_min: Vec<f64> = xs
        .iter()
        .map(|&x| 1.0 - (1.0 - normal_cdf(x)).powf(n))
        .collect();
    interp(0.5, &cdf_min, &xs).abs()
}

/// Calibration ratio for a square window of side `boxsize`.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if `boxsize < 2`. A single
/// pixel window has a minimum with median zero, so the ratio vanishes and
/// no finite noise estimate exists.
pub fn calibration_ratio(boxsize: u32) -> FilterResult<f64> {
    if boxsize < 2 {
        return Err(FilterError::InvalidParameters(format!(
            "boxsize must be at least 2, got {}",
            boxsize
        )));
    }

    let n = (boxsize as f64).powi(2);
    let ratio = order_statistic_ratio(n);
    if !(ratio.is_finite() && ratio > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "boxsize {} gives a degenerate calibration ratio {}",
            boxsize, ratio
        )));
    }
    Ok(ratio)
}

/// Memoized [`calibration_ratio`] keyed by box size
#[derive(Debug, Default, Clone)]
pub struct CalibrationCache {
    ratios: HashMap<u32, f64>,
}

impl CalibrationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Ratio for `boxsize`, computed on first use
    pub fn ratio(&mut self, boxsize: u32) -> FilterResult<f64> {
        if let Some(&ratio) = self.ratios.get(&boxsize) {
            return Ok(ratio);
        }
        let ratio = calibration_ratio(boxsize)?;
        self.ratios.insert(boxsize, ratio);
        Ok(ratio)
    }

    /// Number of cached ratios
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}
