//! Mask pipeline regression test
//!
//! Runs the full image-to-mask pipeline on small hand-built images with
//! known answers, and on a synthetic sky written to and read back from
//! FITS.

use breizorro::io::{read_fits_plane, write_fits, write_fits_plane, write_mask_plane};
use breizorro::{FPix, Mask, MaskOptions, MaskPipeline, NullObserver};
use breizorro_test::{
    RegParams, add_gaussian_source, gaussian_noise_image, mask_from_rows, regout_dir,
};
use std::fs;
use std::path::PathBuf;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from(regout_dir());
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn ring_is_clear(mask: &Mask) -> bool {
    let (w, h) = mask.dimensions();
    (0..w).all(|x| !mask.get_unchecked(x, 0) && !mask.get_unchecked(x, h - 1))
        && (0..h).all(|y| !mask.get_unchecked(0, y) && !mask.get_unchecked(w - 1, y))
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    // --- Test 1: all-zero image gives floor noise and an empty mask ---
    let zero = FPix::new(5, 5).unwrap();
    let pipeline =
        MaskPipeline::new(MaskOptions::default().with_boxsize(3).with_keep_noise(true)).unwrap();
    let out = pipeline.run(&zero, &mut NullObserver).unwrap();
    rp.compare_values(0.0, out.mask.count() as f64, 0.0);
    rp.compare_values(1.0e-10, out.median_noise as f64, 1.0e-16);
    let noise = out.noise.unwrap();
    rp.compare_fpix(&FPix::new_with_value(5, 5, 1.0e-10).unwrap(), &noise, 0.0);

    // --- Test 2: single bright pixel, then dilated into a plus ---
    let point = FPix::from_fn(7, 7, |x, y| if (x, y) == (3, 3) { 100.0 } else { 0.0 }).unwrap();
    let opts = MaskOptions::default().with_boxsize(3).with_threshold(1.0);
    let raw = MaskPipeline::new(opts.clone())
        .unwrap()
        .run(&point, &mut NullObserver)
        .unwrap();
    let single = Mask::from_fn(7, 7, |x, y| (x, y) == (3, 3)).unwrap();
    rp.compare_masks(&single, &raw.mask);

    let dilated = MaskPipeline::new(opts.with_dilate(1))
        .unwrap()
        .run(&point, &mut NullObserver)
        .unwrap();
    let plus = mask_from_rows(&[
        ".......", ".......", "...x...", "..xxx..", "...x...", ".......", ".......",
    ]);
    rp.compare_masks(&plus, &dilated.mask);

    // --- Test 3: an 8x8 block with an interior hole ---
    let block = FPix::from_fn(10, 10, |x, y| {
        let inside = (1..=8).contains(&x) && (1..=8).contains(&y);
        if inside && (x, y) != (4, 4) { 100.0 } else { 0.0 }
    })
    .unwrap();
    let opts = MaskOptions::default().with_boxsize(3);
    let open = MaskPipeline::new(opts.clone())
        .unwrap()
        .run(&block, &mut NullObserver)
        .unwrap();
    let closed = MaskPipeline::new(opts.with_fill_holes(true))
        .unwrap()
        .run(&block, &mut NullObserver)
        .unwrap();
    rp.compare_values(63.0, open.mask.count() as f64, 0.0);
    rp.compare_values(64.0, closed.mask.count() as f64, 0.0);
    rp.check(closed.mask.get(4, 4).unwrap(), "hole filled");

    // --- Test 4: synthetic sky through FITS ---
    let mut sky = gaussian_noise_image(160, 120, 0.5, 2024);
    add_gaussian_source(&mut sky, 40.0, 40.0, 30.0, 5.0);
    add_gaussian_source(&mut sky, 110.0, 70.0, 12.0, 3.0);
    let sky_path = scratch("pipeline_sky.fits");
    write_fits(&sky_path, &sky).unwrap();

    let plane = read_fits_plane(&sky_path).unwrap();
    rp.compare_fpix(&sky, &plane.image, 0.0);

    let opts = MaskOptions::default()
        .with_boxsize(12)
        .with_dilate(2)
        .with_fill_holes(true)
        .with_keep_noise(true);
    let pipeline = MaskPipeline::new(opts).unwrap();
    let out = pipeline.run(&plane.image, &mut NullObserver).unwrap();
    rp.compare_values(0.5, out.median_noise as f64, 0.05);
    rp.check(out.mask.get(40, 40).unwrap(), "first source masked");
    rp.check(out.mask.get(110, 70).unwrap(), "second source masked");
    rp.check(!out.mask.get(80, 100).unwrap(), "empty sky unmasked");
    rp.check(ring_is_clear(&out.mask), "border ring clear");
    rp.write_mask(&out.mask).unwrap();

    let noise_path = scratch("pipeline_sky.noise.fits");
    let mask_path = scratch("pipeline_sky.mask.fits");
    if let Some(noise) = &out.noise {
        write_fits_plane(&sky_path, &noise_path, noise).unwrap();
        let back = read_fits_plane(&noise_path).unwrap();
        rp.compare_fpix(noise, &back.image, 0.0);
    }
    write_mask_plane(&sky_path, &mask_path, &out.mask).unwrap();
    let back = read_fits_plane(&mask_path).unwrap();
    rp.compare_masks(&out.mask, &Mask::from_fpix_nonzero(&back.image));

    // --- Test 5: determinism and threshold monotonicity ---
    let again = pipeline.run(&plane.image, &mut NullObserver).unwrap();
    rp.compare_masks(&out.mask, &again.mask);

    let base = MaskOptions::default().with_boxsize(12);
    let low = MaskPipeline::new(base.clone().with_threshold(4.0))
        .unwrap()
        .run(&sky, &mut NullObserver)
        .unwrap();
    let high = MaskPipeline::new(base.with_threshold(8.0))
        .unwrap()
        .run(&sky, &mut NullObserver)
        .unwrap();
    rp.check(high.mask.is_subset_of(&low.mask).unwrap(), "threshold monotone");
    rp.check(high.mask.count() < low.mask.count(), "higher threshold masks less");

    assert!(rp.cleanup(), "pipeline regression test failed");
}
