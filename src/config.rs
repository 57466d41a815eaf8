//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.paycrunch.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Aggregation job settings.
    #[serde(default)]
    pub job: JobConfig,
}

/// Settings for one aggregation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Folder containing the `.dat` salary record files.
    #[serde(default = "default_source_folder")]
    pub source_folder: PathBuf,

    /// Folder the combined CSV is written into. Must already exist;
    /// it is never created by the aggregator.
    #[serde(default = "default_destination_folder")]
    pub destination_folder: PathBuf,

    /// Name of the output file inside the destination folder.
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            source_folder: default_source_folder(),
            destination_folder: default_destination_folder(),
            output_filename: default_output_filename(),
        }
    }
}

fn default_source_folder() -> PathBuf {
    PathBuf::from("input/")
}

fn default_destination_folder() -> PathBuf {
    PathBuf::from("output/")
}

fn default_output_filename() -> String {
    "result.csv".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".paycrunch.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only explicitly provided values override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref source) = args.source {
            self.job.source_folder = source.clone();
        }
        if let Some(ref dest) = args.dest {
            self.job.destination_folder = dest.clone();
        }
        if let Some(ref name) = args.output_name {
            self.job.output_filename = name.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
