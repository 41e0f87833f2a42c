//! Error types for grid generation.

use crate::coord::BoundingBox;
use thiserror::Error;

/// Errors that can occur while building a planning unit grid.
///
/// These are parameter-validation failures: they surface before any cell is
/// emitted and are never retried.
#[derive(Debug, Error)]
pub enum GridError {
    /// Requested cell area is zero, negative, or not finite.
    #[error("invalid cell area {0}: must be a positive, finite value")]
    InvalidCellArea(f64),

    /// Bounding box has zero width or zero height.
    #[error("degenerate bounding box {0}: zero width or height")]
    DegenerateBounds(BoundingBox),
}
