//! Breizorro - noise-based mask generation for radio astronomy images
//!
//! Builds a binary region-of-interest mask from a 2-D intensity image by
//! estimating the local noise and keeping pixels well above it.
//!
//! # Overview
//!
//! - Local noise from a sliding-window minimum, calibrated against the
//!   order statistics of Gaussian noise
//! - Noise-relative thresholding
//! - Border suppression, binary dilation and hole filling
//! - FITS plane reading and header-preserving write-back
//!
//! # Example
//!
//! ```
//! use breizorro::{FPix, MaskOptions, MaskPipeline, NullObserver};
//!
//! let mut image = FPix::new(32, 32).unwrap();
//! for y in 0..32 {
//!     for x in 0..32 {
//!         // Faint alternating background with one bright pixel
//!         image.set_pixel(x, y, if (x + y) % 2 == 0 { 1.0 } else { -1.0 }).unwrap();
//!     }
//! }
//! image.set_pixel(16, 16, 100.0).unwrap();
//!
//! let pipeline = MaskPipeline::new(MaskOptions::default().with_boxsize(5)).unwrap();
//! let output = pipeline.run(&image, &mut NullObserver).unwrap();
//! assert!(output.mask.get(16, 16).unwrap());
//! ```

pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use breizorro_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use breizorro_filter as filter;
pub use breizorro_io as io;
pub use breizorro_morph as morph;
pub use breizorro_region as region;

pub use breizorro_filter::NoiseEstimate;
pub use pipeline::{
    LogObserver, MaskOptions, MaskOutput, MaskPipeline, NullObserver, PipelineError,
    PipelineEvent, PipelineObserver, PipelineResult,
};
