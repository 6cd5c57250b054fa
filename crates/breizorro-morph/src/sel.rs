//! Structuring elements for mask dilation
//!
//! A `Sel` is a small grid of hit positions around an origin. Dilation
//! reads only the hits.

use crate::{MorphError, MorphResult};
use breizorro_core::ConnectivityType;

/// Structuring element
///
/// Hits are stored relative to the origin `(cx, cy)`, which is placed on
/// each foreground pixel during dilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    hits: Vec<bool>,
}

impl Sel {
    /// Create a rectangular "brick" with all hits, origin at the center
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "brick must be non-empty, got {}x{}",
                width, height
            )));
        }
        Ok(Sel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            hits: vec![true; (width * height) as usize],
        })
    }

    /// 3x3 cross (4-connected neighborhood)
    ///
    /// ```text
    /// . x .
    /// x x x
    /// . x .
    /// ```
    pub fn cross() -> Self {
        Sel {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            hits: vec![false, true, false, true, true, true, false, true, false],
        }
    }

    /// 3x3 square (8-connected neighborhood)
    pub fn square() -> Self {
        Sel {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            hits: vec![true; 9],
        }
    }

    /// Elementary SEL whose neighbors match `connectivity`
    pub fn for_connectivity(connectivity: ConnectivityType) -> Self {
        match connectivity {
            ConnectivityType::FourWay => Self::cross(),
            ConnectivityType::EightWay => Self::square(),
        }
    }

    /// Parse a SEL from rows of text.
    ///
    /// `x` or `X` marks a hit; `.`, `o` and space mark don't-care. Rows are
    /// separated by newlines and must all have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// use breizorro_morph::Sel;
    ///
    /// let sel = Sel::from_string("x.\nxx", 0, 1).unwrap();
    /// assert_eq!(sel.hit_count(), 3);
    /// ```
    pub fn from_string(pattern: &str, origin_x: u32, origin_y: u32) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel("empty pattern".to_string()));
        }

        let mut hits = Vec::with_capacity((width * height) as usize);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for c in row.chars() {
                match c {
                    'x' | 'X' => hits.push(true),
                    '.' | 'o' | ' ' => hits.push(false),
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character '{}' in row {}",
                            other, y
                        )));
                    }
                }
            }
        }

        if origin_x >= width || origin_y >= height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{} element",
                origin_x, origin_y, width, height
            )));
        }

        Ok(Sel {
            width,
            height,
            cx: origin_x,
            cy: origin_y,
            hits,
        })
    }

    /// Get the SEL width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the SEL height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin as (cx, cy)
    pub fn origin(&self) -> (u32, u32) {
        (self.cx, self.cy)
    }

    /// Number of hit positions
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.hits.iter().enumerate().filter_map(move |(idx, &hit)| {
            if hit {
                let x = (idx as u32 % width) as i32;
                let y = (idx as u32 / width) as i32;
                Some((x - cx, y - cy))
            } else {
                None
            }
        })
    }
}
