//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`grid`] - Build a planning unit grid from a bounding box
//! - [`overlap`] - Compute cell/feature overlap records and export CSV

pub mod grid;
pub mod overlap;
