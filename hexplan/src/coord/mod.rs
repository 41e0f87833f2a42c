//! Coordinate reference and extent types.
//!
//! Everything in a planning run (the bounding box, the grid, every feature
//! layer) lives in a single linear, projected coordinate reference system.
//! This module provides the [`Crs`] tag shared by those inputs and the
//! [`BoundingBox`] extent that seeds grid generation.

mod types;

pub use types::{BoundingBox, Crs, ExtentError};
