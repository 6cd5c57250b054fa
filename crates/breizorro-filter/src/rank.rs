//! Rank filtering operations
//!
//! Sliding-window minimum over a rectangular box. The filter is separable:
//! rows are filtered first, then columns, which gives the same result as a
//! direct 2-D minimum.
//!
//! # Boundary policy
//!
//! Samples outside the image are reflected about the edge
//! (`d c b a | a b c d | d c b a`). Windows wider than the image keep
//! reflecting with period `2 * len`. For a window no wider than the image
//! the reflected samples are all real pixels already inside the window, so
//! the result equals a minimum over the clipped window.
//!
//! The window origin sits at `size / 2`: a window of even size covers one
//! more pixel before the center than after it.

use crate::{FilterError, FilterResult};
use breizorro_core::FPix;
use std::collections::VecDeque;

/// Apply minimum filter over a `width` x `height` window.
///
/// NaN samples are ignored. A window containing only NaNs yields
/// `f32::INFINITY`.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameters` if either window side is 0.
pub fn min_filter(fpix: &FPix, width: u32, height: u32) -> FilterResult<FPix> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "window size must be positive, got {}x{}",
            width, height
        )));
    }

    let w = fpix.width() as usize;
    let h = fpix.height();
    let mut out = fpix.clone();

    if width > 1 {
        let mut line = vec![0.0f32; w];
        for y in 0..h {
            min_filter_line(fpix.row(y), width as usize, &mut line);
            out.row_mut(y).copy_from_slice(&line);
        }
    } else {
        // A 1-wide window is the identity apart from the NaN policy
        for v in out.data_mut() {
            *v = ignore_nan(*v);
        }
    }

    if height > 1 {
        let mut column = vec![0.0f32; h as usize];
        let mut filtered = vec![0.0f32; h as usize];
        for x in 0..w as u32 {
            for (y, c) in column.iter_mut().enumerate() {
                *c = out.get_pixel_unchecked(x, y as u32);
            }
            min_filter_line(&column, height as usize, &mut filtered);
            for (y, &v) in filtered.iter().enumerate() {
                out.set_pixel_unchecked(x, y as u32, v);
            }
        }
    }

    Ok(out)
}

#[inline]
fn ignore_nan(v: f32) -> f32 {
    if v.is_nan() { f32::INFINITY } else { v }
}

/// Map a possibly out-of-range index into `0..len` by edge reflection.
#[inline]
fn reflect_index(i: i64, len: usize) -> usize {
    let period = 2 * len as i64;
    let m = i.rem_euclid(period);
    if m < len as i64 {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// 1-D sliding minimum of `src` into `dst` using a monotonic deque.
///
/// O(n) in the line length, independent of `size`.
fn min_filter_line(src: &[f32], size: usize, dst: &mut [f32]) {
    let n = src.len();

    // A window spanning a full reflection period sees every sample
    if size >= 2 * n {
        let min = src.iter().map(|&v| ignore_nan(v)).fold(f32::INFINITY, f32::min);
        dst.fill(min);
        return;
    }

    let before = size / 2;

    let extended: Vec<f32> = (0..n + size - 1)
        .map(|k| ignore_nan(src[reflect_index(k as i64 - before as i64, n)]))
        .collect();

    // Indices into `extended`, values strictly increasing front to back
    let mut window: VecDeque<usize> = VecDeque::with_capacity(size);
    for (k, &v) in extended.iter().enumerate() {
        while window.back().is_some_and(|&b| extended[b] >= v) {
            window.pop_back();
        }
        window.push_back(k);

        if window.front().is_some_and(|&f| f + size <= k) {
            window.pop_front();
        }

        if k + 1 >= size
            && let Some(&f) = window.front()
        {
            dst[k + 1 - size] = extended[f];
        }
    }
}
