//! Border suppression
//!
//! Windowed filters see reflected data along the image edge, so detections
//! in the outermost ring are not trusted. These functions clear that ring.

use breizorro_core::Mask;

/// Clear row 0, row `h - 1`, column 0 and column `w - 1` in place.
///
/// Never fails. When `w <= 2` or `h <= 2` every pixel is on the border
/// and the whole mask is cleared.
pub fn suppress_border(mask: &mut Mask) {
    let (w, h) = mask.dimensions();
    for x in 0..w {
        mask.set_unchecked(x, 0, false);
        mask.set_unchecked(x, h - 1, false);
    }
    for y in 0..h {
        mask.set_unchecked(0, y, false);
        mask.set_unchecked(w - 1, y, false);
    }
}

/// Copy of `mask` with its border ring cleared
pub fn suppressed_border(mask: &Mask) -> Mask {
    let mut out = mask.clone();
    suppress_border(&mut out);
    out
}
