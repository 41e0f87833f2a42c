//! Parallel overlap computation.
//!
//! The overlap engine measures, for every (grid cell, feature) pair whose
//! geometries intersect, the area of their intersection. Work is spread
//! over a fixed pool of worker threads:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     OverlapEngine                          │
//! │   partition grid → dispatch → reduce (completion order)    │
//! └────────────────────────────────────────────────────────────┘
//!           │ work channel                 ▲ result channel
//!           ▼                              │
//! ┌────────────────┐  ┌────────────────┐  ┌────────────────┐
//! │ overlap-worker-0│  │ overlap-worker-1│ … │ overlap-worker-N│
//! │ hull pre-filter │  │ hull pre-filter │   │ hull pre-filter │
//! │ intersect, area │  │ intersect, area │   │ intersect, area │
//! └────────────────┘  └────────────────┘  └────────────────┘
//! ```
//!
//! Workers receive read-only snapshots (an `Arc` of the cells and of the
//! prepared layers) and return one outcome per partition; there is no
//! shared mutable state. Results are consumed as workers finish, so uneven
//! partitions never block faster ones. The caller blocks until every
//! partition has returned.
//!
//! Failure containment follows the smallest unit of work: a malformed
//! layer fails each (partition × layer) unit it touches and is reported as
//! a [`ComputeCondition::GeometryFailure`]; sibling layers and partitions
//! are unaffected. Only parameter validation (worker count, CRS
//! consistency) fails the whole computation.

mod engine;
mod error;
mod partition;
mod record;
mod report;

pub use engine::{EngineConfig, OverlapEngine};
pub use error::OverlapError;
pub use record::OverlapRecord;
pub use report::{ComputeCondition, OverlapReport};
