//! Hexplan - conservation-planning analysis core
//!
//! This library builds hexagonal planning-unit grids over a region of
//! interest and computes the spatial overlap between grid cells and
//! conservation feature layers, producing the (cell, feature, area) records
//! consumed by reserve-selection tooling.
//!
//! # High-Level API
//!
//! Two entry points cover the whole core:
//!
//! ```
//! use hexplan::coord::{BoundingBox, Crs};
//! use hexplan::grid::build_grid;
//! use hexplan::overlap::{EngineConfig, OverlapEngine};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bbox = BoundingBox::new(0.0, 0.0, 1000.0, 1000.0)?;
//! let grid = build_grid(&bbox, 2500.0, Crs::epsg(3857))?;
//!
//! let engine = OverlapEngine::new(EngineConfig::default().with_workers(4));
//! let report = engine.compute(&grid, &[])?;
//! assert!(report.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! Feature layers arrive from collaborators (file loaders, front ends) as
//! typed [`layer::FeatureLayer`] values; persistence and interaction stay
//! outside this crate.

pub mod coord;
pub mod grid;
pub mod layer;
pub mod logging;
pub mod overlap;

/// Version of the hexplan library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
