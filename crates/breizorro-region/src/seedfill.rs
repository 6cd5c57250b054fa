//! Seed fill operations
//!
//! Queue-based flood fill over binary masks, and hole filling built on it.

use crate::error::{RegionError, RegionResult};
use breizorro_core::{ConnectivityType, Mask};
use std::collections::VecDeque;

/// Push the in-bounds neighbors of `(x, y)` onto `queue`.
fn push_neighbors(
    queue: &mut VecDeque<(u32, u32)>,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    connectivity: ConnectivityType,
) {
    for &(dx, dy) in connectivity.offsets() {
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
            queue.push_back((nx as u32, ny as u32));
        }
    }
}

/// Flood fill in a mask starting from a seed point
///
/// Every pixel connected to the seed with the seed's value is set to
/// `new_value`. Returns the number of pixels changed.
///
/// # Errors
///
/// Returns `RegionError::InvalidSeed` if the seed is outside the mask.
pub fn floodfill(
    mask: &mut Mask,
    seed_x: u32,
    seed_y: u32,
    new_value: bool,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    let (width, height) = mask.dimensions();
    if seed_x >= width || seed_y >= height {
        return Err(RegionError::InvalidSeed {
            x: seed_x,
            y: seed_y,
        });
    }

    let old_value = mask.get_unchecked(seed_x, seed_y);
    if old_value == new_value {
        return Ok(0);
    }

    let mut filled_count = 0u32;
    let mut queue = VecDeque::new();
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        if mask.get_unchecked(x, y) != old_value {
            continue;
        }
        mask.set_unchecked(x, y, new_value);
        filled_count += 1;
        push_neighbors(&mut queue, x, y, width, height, connectivity);
    }

    Ok(filled_count)
}

/// Background pixels reachable from the image border.
///
/// Returns a mask that is `true` on every `false` pixel of `mask` joined
/// to the border through `false` pixels under `connectivity`.
pub fn border_connected_background(mask: &Mask, connectivity: ConnectivityType) -> Mask {
    let (width, height) = mask.dimensions();
    let mut reached = mask.clone();
    reached.set_all(false);

    let mut queue = VecDeque::new();
    let seed = |x: u32, y: u32, reached: &mut Mask, queue: &mut VecDeque<(u32, u32)>| {
        if !mask.get_unchecked(x, y) && !reached.get_unchecked(x, y) {
            reached.set_unchecked(x, y, true);
            queue.push_back((x, y));
        }
    };

    for x in 0..width {
        seed(x, 0, &mut reached, &mut queue);
        seed(x, height - 1, &mut reached, &mut queue);
    }
    for y in 0..height {
        seed(0, y, &mut reached, &mut queue);
        seed(width - 1, y, &mut reached, &mut queue);
    }

    let mut neighbors = VecDeque::new();
    while let Some((x, y)) = queue.pop_front() {
        push_neighbors(&mut neighbors, x, y, width, height, connectivity);
        while let Some((nx, ny)) = neighbors.pop_front() {
            if !mask.get_unchecked(nx, ny) && !reached.get_unchecked(nx, ny) {
                reached.set_unchecked(nx, ny, true);
                queue.push_back((nx, ny));
            }
        }
    }

    reached
}

/// Fill holes in a mask
///
/// A hole is a maximal region of background (`false`) pixels that is not
/// connected to the image border. `connectivity` is the adjacency used to
/// walk the background. Every hole pixel becomes `true`; border pixels and
/// border-connected background are untouched, so the operation is
/// idempotent.
pub fn fill_holes(mask: &Mask, connectivity: ConnectivityType) -> Mask {
    let outside = border_connected_background(mask, connectivity);
    let mut result = mask.clone();
    for (r, &o) in result.data_mut().iter_mut().zip(outside.data()) {
        // Foreground stays, background not reached from the border is a hole
        *r = !o;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> Mask {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        Mask::from_fn(w, h, |x, y| rows[y as usize].as_bytes()[x as usize] == b'x').unwrap()
    }

    #[test]
    fn test_floodfill_basic() {
        let mut mask = Mask::new(5, 5).unwrap();
        let count = floodfill(&mut mask, 2, 2, true, ConnectivityType::FourWay).unwrap();
        assert_eq!(count, 25);
        assert_eq!(mask.count(), 25);
    }

    #[test]
    fn test_floodfill_bounded() {
        let mut mask = mask_from(&[".....", ".xxx.", ".x.x.", ".xxx.", "....."]);
        let count = floodfill(&mut mask, 2, 2, true, ConnectivityType::FourWay).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_floodfill_same_value_is_noop() {
        let mut mask = Mask::new(3, 3).unwrap();
        let count = floodfill(&mut mask, 1, 1, false, ConnectivityType::FourWay).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_floodfill_invalid_seed() {
        let mut mask = Mask::new(3, 3).unwrap();
        assert!(matches!(
            floodfill(&mut mask, 3, 0, true, ConnectivityType::FourWay),
            Err(RegionError::InvalidSeed { x: 3, y: 0 })
        ));
    }

    #[test]
    fn test_floodfill_diagonal_leak() {
        // Diagonal gap: closed for 4-way, open for 8-way
        let rows = [".x.", "x.x", ".x."];
        let mut four = mask_from(&rows);
        let mut eight = mask_from(&rows);
        assert_eq!(
            floodfill(&mut four, 1, 1, true, ConnectivityType::FourWay).unwrap(),
            1
        );
        assert_eq!(
            floodfill(&mut eight, 1, 1, true, ConnectivityType::EightWay).unwrap(),
            5
        );
    }

    #[test]
    fn test_fill_holes_ring() {
        let mask = mask_from(&[".....", ".xxx.", ".x.x.", ".xxx.", "....."]);
        let filled = fill_holes(&mask, ConnectivityType::FourWay);
        assert!(filled.get(2, 2).unwrap());
        assert_eq!(filled.count(), 9);
    }

    #[test]
    fn test_fill_holes_connectivity() {
        // The center touches the outside only through a diagonal gap
        let mask = mask_from(&[".....", ".xx..", ".x.x.", ".xxx.", "....."]);
        let four = fill_holes(&mask, ConnectivityType::FourWay);
        let eight = fill_holes(&mask, ConnectivityType::EightWay);
        assert!(four.get(2, 2).unwrap());
        assert!(!eight.get(2, 2).unwrap());
    }

    #[test]
    fn test_fill_holes_border_background_untouched() {
        // The notch at the top edge is background joined to the border
        let mask = mask_from(&["xx.xx", "x...x", "xxxxx"]);
        let filled = fill_holes(&mask, ConnectivityType::FourWay);
        assert_eq!(filled, mask);
    }

    #[test]
    fn test_fill_holes_idempotent() {
        let mask = mask_from(&[
            "........",
            ".xxxx...",
            ".x..x.x.",
            ".xxxx.x.",
            "......x.",
            "..xxx...",
            "..x.x...",
            "..xxx...",
        ]);
        let once = fill_holes(&mask, ConnectivityType::FourWay);
        let twice = fill_holes(&once, ConnectivityType::FourWay);
        assert_eq!(once, twice);
        assert!(mask.is_subset_of(&once).unwrap());
        assert_eq!(once.count(), mask.count() + 3);
    }

    #[test]
    fn test_border_connected_background() {
        let mask = mask_from(&[".....", ".xxx.", ".x.x.", ".xxx.", "....."]);
        let outside = border_connected_background(&mask, ConnectivityType::FourWay);
        assert_eq!(outside.count(), 16);
        assert!(!outside.get(2, 2).unwrap());
    }
}
