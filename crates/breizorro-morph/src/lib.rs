//! breizorro-morph - Morphological cleanup of binary masks
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) for defining operation neighborhoods
//! - Binary dilation, single pass or iterated
//! - Border suppression (clearing the outermost ring of a mask)

pub mod binary;
pub mod border;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::Sel;

pub use binary::{dilate, dilate_iterations};
pub use border::{suppress_border, suppressed_border};
