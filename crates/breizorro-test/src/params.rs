//! Per-test bookkeeping for the `*_reg` integration tests

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use breizorro_core::{FPix, Mask};
use std::fs;

/// How much a regression test writes besides pass/fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Checks only
    #[default]
    Compare,
    /// Checks plus FITS dumps under `tests/regout`
    Display,
}

impl RegTestMode {
    /// `REGTEST_MODE=display` selects [`RegTestMode::Display`]
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test: its name, a running check counter and the
/// failures seen so far.
pub struct RegParams {
    /// Used in messages and dump file names
    pub test_name: String,
    /// Number of the last check
    index: usize,
    /// Output mode
    pub mode: RegTestMode,
    /// False after the first failed check
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Start a test named `test_name`, reading the mode from `REGTEST_MODE`
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();
        if mode == RegTestMode::Display {
            // Dump failures are reported per write, not here
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!("\n=== {}_reg ({:?}) ===", test_name, mode);

        Self {
            test_name: test_name.to_owned(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Number of the last check or dump
    pub fn index(&self) -> usize {
        self.index
    }

    /// True when images are dumped as well as checked
    pub fn display(&self) -> bool {
        matches!(self.mode, RegTestMode::Display)
    }

    fn next(&mut self) -> usize {
        self.index += 1;
        self.index
    }

    fn fail(&mut self, what: &str, detail: String) -> bool {
        let msg = format!("{}_reg #{}: {} failed, {}", self.test_name, self.index, what, detail);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Pass when `actual` is within `delta` of `expected`; NaN never passes
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.next();
        let diff = (expected - actual).abs();
        diff <= delta
            || self.fail(
                "value check",
                format!("wanted {} got {} (off by {}, tolerance {})", expected, actual, diff, delta),
            )
    }

    /// Pass when `condition` holds, otherwise record `what`
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.next();
        condition || self.fail(what, "condition false".to_owned())
    }

    /// Pass when the masks agree pixel for pixel
    pub fn compare_masks(&mut self, expected: &Mask, actual: &Mask) -> bool {
        self.next();
        if expected.dimensions() != actual.dimensions() {
            let detail = format!("shapes {:?} and {:?}", expected.dimensions(), actual.dimensions());
            return self.fail("mask check", detail);
        }

        let width = expected.width() as usize;
        match expected.data().iter().zip(actual.data()).position(|(a, b)| a != b) {
            None => true,
            Some(i) => self.fail(
                "mask check",
                format!("first difference at ({}, {})", i % width, i / width),
            ),
        }
    }

    /// Pass when the images agree within `delta` per pixel
    ///
    /// Two NaN pixels at the same position count as equal.
    pub fn compare_fpix(&mut self, expected: &FPix, actual: &FPix, delta: f32) -> bool {
        self.next();
        if expected.dimensions() != actual.dimensions() {
            let detail = format!("shapes {:?} and {:?}", expected.dimensions(), actual.dimensions());
            return self.fail("image check", detail);
        }

        let close = |a: f32, b: f32| (a.is_nan() && b.is_nan()) || (a - b).abs() <= delta;
        let (want, got) = (expected.data(), actual.data());
        let width = expected.width() as usize;
        match want.iter().zip(got).position(|(&a, &b)| !close(a, b)) {
            None => true,
            Some(i) => self.fail(
                "image check",
                format!(
                    "first difference at ({}, {}): {} vs {}",
                    i % width,
                    i / width,
                    want[i],
                    got[i]
                ),
            ),
        }
    }

    /// Dump a float image as `tests/regout/<test>.NN.fits` in display mode
    ///
    /// Counts as a step in compare mode too, so dump names stay stable.
    pub fn write_fpix(&mut self, image: &FPix) -> TestResult<()> {
        let n = self.next();
        if !self.display() {
            return Ok(());
        }

        let path = format!("{}/{}.{:02}.fits", regout_dir(), self.test_name, n);
        breizorro_io::write_fits(&path, image).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("dumped {}", path);
        Ok(())
    }

    /// Dump a mask as a 1/0 float image in display mode
    pub fn write_mask(&mut self, mask: &Mask) -> TestResult<()> {
        self.write_fpix(&mask.to_fpix())
    }

    /// Print the summary and return whether every check passed
    pub fn cleanup(self) -> bool {
        let verdict = if self.success { "ok" } else { "FAILED" };
        eprintln!("=== {}_reg {} ===", self.test_name, verdict);
        for failure in &self.failures {
            eprintln!("  {}", failure);
        }
        self.success
    }

    /// False once any check has failed
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Messages of the failed checks, oldest first
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_tolerance() {
        let mut rp = RegParams::new("params");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.compare_values(1.0, f64::NAN, 10.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 2);
        assert_eq!(rp.index(), 3);
    }

    #[test]
    fn test_mask_difference_located() {
        let a = Mask::from_fn(3, 2, |x, _| x == 1).unwrap();
        let mut b = a.clone();
        let mut rp = RegParams::new("params");
        assert!(rp.compare_masks(&a, &b));
        b.set(2, 1, true).unwrap();
        assert!(!rp.compare_masks(&a, &b));
        assert!(rp.failures()[0].contains("(2, 1)"));
    }

    #[test]
    fn test_compare_fpix_nan_aware() {
        let a = FPix::from_data(2, 1, vec![1.0, f32::NAN]).unwrap();
        let b = FPix::from_data(2, 1, vec![1.05, f32::NAN]).unwrap();
        let mut rp = RegParams::new("params");
        assert!(rp.compare_fpix(&a, &b, 0.1));
        assert!(!rp.compare_fpix(&a, &b, 0.01));
    }
}
