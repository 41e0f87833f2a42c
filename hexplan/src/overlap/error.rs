//! Error types for overlap computation.
//!
//! Only parameter validation produces a hard error here; geometry failures
//! during the computation are contained per unit of work and surface as
//! [`ComputeCondition`](crate::overlap::ComputeCondition) values instead.

use crate::coord::Crs;
use thiserror::Error;

/// Errors that fail an overlap computation before any work starts.
#[derive(Debug, Error)]
pub enum OverlapError {
    /// The configured worker count is zero.
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    /// A layer's CRS differs from the grid's CRS. The engine never
    /// reprojects; mismatched inputs are rejected outright.
    #[error("layer '{layer}' CRS {layer_crs} does not match grid CRS {grid_crs}")]
    CrsMismatch {
        /// Name of the offending layer.
        layer: String,
        /// The layer's CRS.
        layer_crs: Crs,
        /// The grid's CRS.
        grid_crs: Crs,
    },
}
