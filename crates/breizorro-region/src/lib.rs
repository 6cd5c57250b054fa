//! breizorro-region - Region processing for breizorro masks
//!
//! This crate provides seed-fill based operations on binary masks:
//!
//! - **Flood fill** - Recolor the connected region around a seed
//! - **Hole filling** - Close background regions enclosed by foreground
//!
//! # Examples
//!
//! ```
//! use breizorro_core::{ConnectivityType, Mask};
//! use breizorro_region::fill_holes;
//!
//! // A 3x3 ring with an empty center
//! let ring = Mask::from_fn(5, 5, |x, y| {
//!     (1..=3).contains(&x) && (1..=3).contains(&y) && !(x == 2 && y == 2)
//! })
//! .unwrap();
//!
//! let filled = fill_holes(&ring, ConnectivityType::FourWay);
//! assert!(filled.get(2, 2).unwrap());
//! assert_eq!(filled.count(), 9);
//! ```

pub mod error;
pub mod seedfill;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export seedfill functions
pub use seedfill::{border_connected_background, fill_holes, floodfill};
