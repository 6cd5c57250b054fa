//! Synthetic test data
//!
//! All generators are seeded, so a test sees the same pixels on every run.

use breizorro_core::{FPix, Mask};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Build a mask from text rows; `x` or `X` is foreground, anything else is
/// background.
///
/// # Panics
///
/// Panics if `rows` is empty or the rows differ in length.
pub fn mask_from_rows(rows: &[&str]) -> Mask {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    assert!(
        rows.iter().all(|r| r.len() as u32 == width),
        "ragged mask rows"
    );
    Mask::from_fn(width, height, |x, y| {
        matches!(rows[y as usize].as_bytes()[x as usize], b'x' | b'X')
    })
    .expect("mask rows must be non-empty")
}

/// Random mask where each pixel is foreground with probability `density`
pub fn random_mask(width: u32, height: u32, density: f64, seed: u64) -> Mask {
    let mut rng = StdRng::seed_from_u64(seed);
    Mask::from_fn(width, height, |_, _| rng.random_bool(density))
        .expect("random mask dimensions must be non-zero")
}

/// Zero-mean Gaussian noise image with standard deviation `sigma`
///
/// # Panics
///
/// Panics if `sigma` is negative or not finite.
pub fn gaussian_noise_image(width: u32, height: u32, sigma: f32, seed: u64) -> FPix {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0f64, sigma as f64).expect("sigma must be finite and non-negative");
    FPix::from_fn(width, height, |_, _| normal.sample(&mut rng) as f32)
        .expect("noise image dimensions must be non-zero")
}

/// Add a circular Gaussian source of peak `amplitude` centered at `(cx, cy)`
pub fn add_gaussian_source(image: &mut FPix, cx: f32, cy: f32, amplitude: f32, fwhm: f32) {
    let sigma = fwhm / (2.0 * (2.0 * 2.0f32.ln()).sqrt());
    let two_s2 = 2.0 * sigma * sigma;
    let (w, h) = image.dimensions();
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let v = image.get_pixel_unchecked(x, y);
            image.set_pixel_unchecked(x, y, v + amplitude * (-(dx * dx + dy * dy) / two_s2).exp());
        }
    }
}
