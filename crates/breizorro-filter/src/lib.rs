//! breizorro-filter - Noise estimation and thresholding
//!
//! This crate turns a restored radio image into a raw detection mask:
//!
//! - Rank filtering (sliding-window minimum with reflected borders)
//! - Order-statistic calibration of the window minimum
//! - Local noise maps with floor and median-clamp guards
//! - Thresholding an image against `threshold * noise`

pub mod calibrate;
mod error;
pub mod noise;
pub mod rank;
pub mod threshold;

pub use error::{FilterError, FilterResult};

// Re-export commonly used functions
pub use calibrate::{CalibrationCache, calibration_ratio, order_statistic_ratio};
pub use noise::{NOISE_FLOOR, NoiseEstimate, estimate_noise, estimate_noise_with_ratio};
pub use rank::min_filter;
pub use threshold::threshold_mask;
