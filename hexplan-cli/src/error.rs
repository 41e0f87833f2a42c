//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use hexplan::coord::ExtentError;
use hexplan::grid::GridError;
use hexplan::overlap::OverlapError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid extent supplied on the command line
    Extent(ExtentError),
    /// Grid generation failed
    Grid(GridError),
    /// Overlap computation rejected its inputs
    Overlap(OverlapError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Failed to write an output file
    FileWrite { path: String, error: std::io::Error },
    /// An input file did not match the expected format
    Parse { path: String, message: String },
    /// A --filter expression could not be parsed
    InvalidFilter(String),
    /// Every partition/layer unit failed during overlap computation
    ComputationFailed,
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::InvalidFilter(_) => {
                eprintln!();
                eprintln!("Filters take the form FIELD=VALUE[,VALUE...], for example:");
                eprintln!("  --filter CLASS_TYPE=bog");
                eprintln!("  --filter ID=3,7,12");
            }
            CliError::ComputationFailed => {
                eprintln!();
                eprintln!("Every partition/layer unit failed. Check logs/hexplan.log for");
                eprintln!("the individual geometry failures.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Extent(e) => write!(f, "Invalid extent: {}", e),
            CliError::Grid(e) => write!(f, "Grid generation failed: {}", e),
            CliError::Overlap(e) => write!(f, "Overlap computation failed: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
            CliError::Parse { path, message } => {
                write!(f, "Failed to parse '{}': {}", path, message)
            }
            CliError::InvalidFilter(msg) => write!(f, "Invalid filter expression: {}", msg),
            CliError::ComputationFailed => {
                write!(f, "Overlap computation produced no results: all units failed")
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<ExtentError> for CliError {
    fn from(err: ExtentError) -> Self {
        CliError::Extent(err)
    }
}

impl From<GridError> for CliError {
    fn from(err: GridError) -> Self {
        CliError::Grid(err)
    }
}

impl From<OverlapError> for CliError {
    fn from(err: OverlapError) -> Self {
        CliError::Overlap(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CliError::LoggingInit("permission denied".to_string());
        assert!(err.to_string().contains("permission denied"));

        let err = CliError::InvalidFilter("no '=' found".to_string());
        assert!(err.to_string().contains("no '='"));

        let err = CliError::ComputationFailed;
        assert!(err.to_string().contains("all units failed"));
    }

    #[test]
    fn test_from_grid_error() {
        let err: CliError = GridError::InvalidCellArea(-1.0).into();
        assert!(matches!(err, CliError::Grid(_)));
    }
}
