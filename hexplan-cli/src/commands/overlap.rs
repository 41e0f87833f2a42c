//! Overlap command - compute cell/feature overlap and export CSV.

use crate::error::CliError;
use crate::format::{render_csv, GridFile, LayerFile};
use clap::Args;
use hexplan::layer::{AttrField, AttrValue, FeatureLayer};
use hexplan::overlap::{EngineConfig, OverlapEngine};
use std::fs;
use tracing::warn;

/// Arguments for the overlap command.
#[derive(Debug, Args)]
pub struct OverlapArgs {
    /// Planning unit grid file (as written by `hexplan grid`)
    #[arg(long)]
    pub grid: String,

    /// Feature layer file; repeat for multiple layers
    #[arg(long = "layer", required = true)]
    pub layers: Vec<String>,

    /// Attribute filter, FIELD=VALUE[,VALUE...]; repeat to AND filters
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Output CSV file path
    #[arg(long)]
    pub output: String,
}

/// Run the overlap command.
pub fn run(args: OverlapArgs) -> Result<(), CliError> {
    let grid = load_grid(&args.grid)?;
    let mut layers = Vec::with_capacity(args.layers.len());
    for path in &args.layers {
        layers.push(load_layer(path)?);
    }

    for expr in &args.filters {
        let (field, values) = parse_filter(expr)?;
        layers = layers
            .iter()
            .map(|layer| layer.filter_by(field, &values))
            .collect();
    }

    let mut config = EngineConfig::default();
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let engine = OverlapEngine::new(config);
    let report = engine.compute(&grid, &layers)?;

    for condition in report.conditions() {
        warn!("{}", condition);
    }
    if report.total_failure() {
        return Err(CliError::ComputationFailed);
    }

    // The engine gives no ordering guarantee; sort for a stable export.
    let records = report.sorted_records();
    fs::write(&args.output, render_csv(&records)).map_err(|error| CliError::FileWrite {
        path: args.output.clone(),
        error,
    })?;

    println!("Overlap table written to {}", args.output);
    println!("  Records: {}", records.len());
    println!("  Layers: {}", layers.len());
    if !report.conditions().is_empty() {
        println!("  Conditions: {} (see logs)", report.conditions().len());
    }

    Ok(())
}

fn load_grid(path: &str) -> Result<hexplan::grid::Grid, CliError> {
    let data = fs::read_to_string(path).map_err(|error| CliError::FileRead {
        path: path.to_string(),
        error,
    })?;
    let file: GridFile = serde_json::from_str(&data).map_err(|e| CliError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    Ok(file.into_grid())
}

fn load_layer(path: &str) -> Result<FeatureLayer, CliError> {
    let data = fs::read_to_string(path).map_err(|error| CliError::FileRead {
        path: path.to_string(),
        error,
    })?;
    let file: LayerFile = serde_json::from_str(&data).map_err(|e| CliError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    file.into_layer().map_err(|message| CliError::Parse {
        path: path.to_string(),
        message,
    })
}

/// Parse a `FIELD=VALUE[,VALUE...]` filter expression.
fn parse_filter(expr: &str) -> Result<(AttrField, Vec<AttrValue>), CliError> {
    let (field, values) = expr
        .split_once('=')
        .ok_or_else(|| CliError::InvalidFilter(format!("no '=' in '{}'", expr)))?;
    let field: AttrField = field
        .parse()
        .map_err(CliError::InvalidFilter)?;
    let values: Vec<AttrValue> = values
        .split(',')
        .filter(|v| !v.is_empty())
        .map(parse_value)
        .collect();
    if values.is_empty() {
        return Err(CliError::InvalidFilter(format!("no values in '{}'", expr)));
    }
    Ok((field, values))
}

/// Interpret a filter value: integer, then float, then text.
fn parse_value(raw: &str) -> AttrValue {
    if let Ok(i) = raw.parse::<i64>() {
        AttrValue::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        AttrValue::Float(f)
    } else {
        AttrValue::Text(raw.to_string())
    }
}
