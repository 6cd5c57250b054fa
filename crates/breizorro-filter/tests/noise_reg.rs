//! Noise estimation regression test
//!
//! Tests the calibration ratio, the local noise map and noise-relative
//! thresholding on flat and synthetic Gaussian images.

use breizorro_core::FPix;
use breizorro_filter::{
    CalibrationCache, NOISE_FLOOR, calibration_ratio, estimate_noise, min_filter,
    threshold_mask,
};
use breizorro_test::{RegParams, add_gaussian_source, gaussian_noise_image};

#[test]
fn noise_reg() {
    let mut rp = RegParams::new("noise");

    // --- Test 1: calibration ratios against reference values ---
    for (boxsize, expected) in [
        (2, 0.99816),
        (3, 1.445_748),
        (5, 1.92135),
        (10, 2.46207),
        (50, 3.452_979),
        (200, 4.14054),
    ] {
        let ratio = calibration_ratio(boxsize).unwrap();
        rp.compare_values(expected, ratio, 1.0e-4);
    }
    rp.check(calibration_ratio(1).is_err(), "boxsize 1 rejected");
    rp.check(calibration_ratio(0).is_err(), "boxsize 0 rejected");

    let mut cache = CalibrationCache::new();
    let first = cache.ratio(50).unwrap();
    let second = cache.ratio(50).unwrap();
    rp.compare_values(first, second, 0.0);
    rp.compare_values(1.0, cache.len() as f64, 0.0);

    // --- Test 2: all-zero image ---
    let zero = FPix::new(5, 5).unwrap();
    let est = estimate_noise(&zero, 3).unwrap();
    rp.compare_values(NOISE_FLOOR as f64, est.median_noise as f64, 0.0);
    rp.compare_fpix(
        &FPix::new_with_value(5, 5, NOISE_FLOOR).unwrap(),
        &est.noise,
        0.0,
    );
    let mask = threshold_mask(&zero, &est.noise, 6.5).unwrap();
    rp.compare_values(0.0, mask.count() as f64, 0.0);

    // --- Test 3: Gaussian noise, median noise tracks sigma ---
    let sigma = 1.5;
    let image = gaussian_noise_image(200, 200, sigma, 42);
    let est = estimate_noise(&image, 10).unwrap();
    rp.compare_values(sigma as f64, est.median_noise as f64, 0.1 * sigma as f64);
    let floor_ok = est
        .noise
        .data()
        .iter()
        .all(|&n| n > 0.0 && n >= est.median_noise);
    rp.check(floor_ok, "noise positive and clamped to the median");
    rp.write_fpix(&est.noise).unwrap();

    // --- Test 4: determinism ---
    let again = estimate_noise(&image, 10).unwrap();
    rp.compare_fpix(&est.noise, &again.noise, 0.0);
    rp.compare_values(est.median_noise as f64, again.median_noise as f64, 0.0);

    // --- Test 5: threshold on a source in noise ---
    let mut sky = gaussian_noise_image(128, 128, 1.0, 7);
    add_gaussian_source(&mut sky, 64.0, 64.0, 25.0, 4.0);
    let est = estimate_noise(&sky, 10).unwrap();
    let strict = threshold_mask(&sky, &est.noise, 6.5).unwrap();
    let loose = threshold_mask(&sky, &est.noise, 3.0).unwrap();
    rp.check(strict.get(64, 64).unwrap(), "source peak detected");
    rp.check(strict.is_subset_of(&loose).unwrap(), "threshold monotone");
    let mut far_detections = 0;
    for y in 0..128u32 {
        for x in 0..128u32 {
            let r2 = x.abs_diff(64).pow(2) + y.abs_diff(64).pow(2);
            if strict.get_unchecked(x, y) && r2 > 25 {
                far_detections += 1;
            }
        }
    }
    rp.compare_values(0.0, far_detections as f64, 0.0);
    rp.write_mask(&strict).unwrap();

    // --- Test 6: window wider than the image ---
    let row = FPix::from_data(3, 1, vec![3.0, 1.0, 2.0]).unwrap();
    let min = min_filter(&row, 7, 7).unwrap();
    rp.compare_fpix(&FPix::new_with_value(3, 1, 1.0).unwrap(), &min, 0.0);

    // --- Test 7: box far larger than the image ---
    let tiny = FPix::from_data(4, 1, vec![0.5, -2.0, 1.0, -1.0]).unwrap();
    let min = min_filter(&tiny, 3_000_000_000, 3_000_000_000).unwrap();
    rp.compare_fpix(&FPix::new_with_value(4, 1, -2.0).unwrap(), &min, 0.0);
    let est = estimate_noise(&tiny, 3_000_000_000).unwrap();
    let uniform = est.noise.data().iter().all(|&n| n == est.median_noise);
    rp.check(uniform && est.median_noise > 0.0, "huge box gives one noise level");

    assert!(rp.cleanup(), "noise regression test failed");
}
