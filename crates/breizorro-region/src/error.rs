//! Region errors

use thiserror::Error;

/// Failure of a seed-fill operation
#[derive(Debug, Error)]
pub enum RegionError {
    /// Seed pixel lies outside the mask
    #[error("seed ({x}, {y}) is outside the mask")]
    InvalidSeed { x: u32, y: u32 },
}

/// Shorthand for region results
pub type RegionResult<T> = Result<T, RegionError>;
