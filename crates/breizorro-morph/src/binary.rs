//! Binary dilation
//!
//! Dilation grows foreground regions: every foreground pixel stamps the
//! structuring element's hits into the output. Pixels outside the image
//! are background and never contribute.

use crate::{MorphResult, Sel};
use breizorro_core::Mask;

/// Dilate a mask once with `sel`.
///
/// `out(x + dx, y + dy) = true` for every foreground `(x, y)` and every
/// hit offset `(dx, dy)`. Stamps falling outside the image are dropped.
///
/// # Examples
///
/// ```
/// use breizorro_core::Mask;
/// use breizorro_morph::{Sel, dilate};
///
/// let seed = Mask::from_fn(5, 5, |x, y| x == 2 && y == 2).unwrap();
/// let grown = dilate(&seed, &Sel::cross()).unwrap();
/// assert_eq!(grown.count(), 5);
/// ```
pub fn dilate(mask: &Mask, sel: &Sel) -> MorphResult<Mask> {
    let (w, h) = mask.dimensions();
    let mut out = Mask::new(w, h)?;
    let hit_offsets: Vec<_> = sel.hit_offsets().collect();

    for y in 0..h {
        for (x, _) in mask.row(y).iter().enumerate().filter(|&(_, &b)| b) {
            for &(dx, dy) in &hit_offsets {
                let tx = x as i64 + dx as i64;
                let ty = y as i64 + dy as i64;
                if tx >= 0 && ty >= 0 && tx < w as i64 && ty < h as i64 {
                    out.set_unchecked(tx as u32, ty as u32, true);
                }
            }
        }
    }

    Ok(out)
}

/// Dilate `iterations` times in sequence.
///
/// `iterations == 0` returns an unchanged copy. Once a pass changes
/// nothing the remaining passes are skipped, since they could not change
/// anything either.
pub fn dilate_iterations(mask: &Mask, sel: &Sel, iterations: u32) -> MorphResult<Mask> {
    let mut current = mask.clone();
    for _ in 0..iterations {
        let next = dilate(&current, sel)?;
        if next == current {
            break;
        }
        current = next;
    }
    Ok(current)
}
