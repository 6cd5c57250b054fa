//! Shared helpers for the `*_reg` integration tests
//!
//! - **RegParams**: indexed value, mask and image comparisons that collect
//!   failures and report them in one place
//! - **Synthetic data**: seeded noise images, sources and masks
//!
//! # Usage
//!
//! ```ignore
//! use breizorro_test::RegParams;
//!
//! let mut rp = RegParams::new("noise");
//! rp.compare_values(1.0e-10, noise.median() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Output
//!
//! With `REGTEST_MODE=display`, images passed to [`RegParams::write_fpix`]
//! and [`RegParams::write_mask`] are saved as FITS under `tests/regout`.

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use synth::{add_gaussian_source, gaussian_noise_image, mask_from_rows, random_mask};

/// Workspace root, two levels above this crate's manifest
fn workspace_root() -> String {
    format!("{}/../..", env!("CARGO_MANIFEST_DIR"))
}

/// Directory for display-mode dumps and scratch FITS files
pub fn regout_dir() -> String {
    let mut dir = workspace_root();
    dir.push_str("/tests/regout");
    dir
}
