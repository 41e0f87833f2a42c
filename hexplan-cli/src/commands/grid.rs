//! Grid command - build a planning unit grid and write it to a file.

use crate::error::CliError;
use crate::format::GridFile;
use clap::Args;
use hexplan::coord::{BoundingBox, Crs};
use hexplan::grid::build_grid;
use std::fs;

/// Arguments for the grid command.
#[derive(Debug, Args)]
pub struct GridArgs {
    /// West edge of the region of interest
    #[arg(long)]
    pub xmin: f64,

    /// South edge of the region of interest
    #[arg(long)]
    pub ymin: f64,

    /// East edge of the region of interest
    #[arg(long)]
    pub xmax: f64,

    /// North edge of the region of interest
    #[arg(long)]
    pub ymax: f64,

    /// Grid cell area, in squared CRS units (e.g. square meters)
    #[arg(long)]
    pub area: f64,

    /// Coordinate reference system of the extent (e.g. EPSG:3857)
    #[arg(long, default_value = "EPSG:3857")]
    pub crs: String,

    /// Output grid file path
    #[arg(long)]
    pub output: String,
}

/// Run the grid command.
pub fn run(args: GridArgs) -> Result<(), CliError> {
    let bbox = BoundingBox::new(args.xmin, args.ymin, args.xmax, args.ymax)?;
    let grid = build_grid(&bbox, args.area, Crs::new(args.crs.as_str()))?;

    let file = GridFile::from_grid(&grid);
    let json = serde_json::to_string_pretty(&file).map_err(|e| CliError::FileWrite {
        path: args.output.clone(),
        error: e.into(),
    })?;
    fs::write(&args.output, json).map_err(|error| CliError::FileWrite {
        path: args.output.clone(),
        error,
    })?;

    println!("Planning unit grid written to {}", args.output);
    println!("  Cells: {}", grid.len());
    println!("  Cell area: {}", args.area);
    println!("  Hex edge: {:.3}", grid.hex_edge());
    println!("  CRS: {}", grid.crs());

    Ok(())
}
