//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Paycrunch - batch aggregator for tab-delimited salary records
///
/// Merge every `.dat` file in a source folder into one CSV with a
/// computed gross-salary column and a trailing summary footer.
///
/// Examples:
///   paycrunch
///   paycrunch --source payroll/incoming --dest payroll/processed
///   paycrunch --source records/ --dry-run
///   paycrunch --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Source folder containing the `.dat` salary record files
    ///
    /// Defaults to `input/` (or the config file value when present).
    #[arg(short, long, value_name = "DIR", env = "PAYCRUNCH_SOURCE")]
    pub source: Option<PathBuf>,

    /// Destination folder for the combined CSV
    ///
    /// Must already exist; it is not created. Defaults to `output/`
    /// (or the config file value when present).
    #[arg(short, long, value_name = "DIR", env = "PAYCRUNCH_DEST")]
    pub dest: Option<PathBuf>,

    /// Name of the output file written into the destination folder
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output_name: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .paycrunch.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: list the .dat files that would be merged, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .paycrunch.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate the output name if provided
        if let Some(ref name) = self.output_name {
            if name.is_empty() {
                return Err("Output name must not be empty".to_string());
            }
            if name.contains('/') || name.contains('\\') {
                return Err("Output name must be a plain file name, not a path".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// All-defaults instance for use in unit tests.
    #[cfg(test)]
    pub fn defaults_for_tests() -> Self {
        Self {
            source: None,
            dest: None,
            output_name: None,
            config: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }
}
