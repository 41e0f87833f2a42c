//! Hexplan CLI - command-line collaborator for the planning core.
//!
//! This binary gathers typed inputs (bounding boxes, feature layer files),
//! invokes the library's two entry points, and owns all persistence: grids
//! are written as JSON, overlap results as `SPECIES,PU,AMOUNT` CSV.

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod format;

use error::CliError;

#[derive(Parser)]
#[command(name = "hexplan")]
#[command(version = hexplan::VERSION)]
#[command(about = "Hexagonal planning unit grids and overlap tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a hexagonal planning unit grid and write it to a JSON file
    Grid(commands::grid::GridArgs),
    /// Compute cell/feature overlap records and export them as CSV
    Overlap(commands::overlap::OverlapArgs),
}

fn main() {
    let cli = Cli::parse();

    let _guard = match hexplan::logging::init_logging(
        hexplan::logging::default_log_dir(),
        hexplan::logging::default_log_file(),
    ) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Commands::Grid(args) => commands::grid::run(args),
        Commands::Overlap(args) => commands::overlap::run(args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
