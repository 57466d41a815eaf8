//! Paycrunch - Batch Salary Records Aggregator
//!
//! A CLI tool that merges tab-delimited `.dat` salary record files
//! from a source folder into one combined CSV with a computed
//! gross-salary column and a trailing summary footer row.
//!
//! Exit codes:
//!   0 - Success, including the reported no-output conditions
//!       (missing source folder, no salary data found)
//!   1 - Runtime error (bad config, missing expected columns, write failure)

mod analysis;
mod cli;
mod config;
mod models;
mod parser;
mod pipeline;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use models::RunOutcome;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("Paycrunch v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(()) => {}
        Err(e) => {
            error!("Aggregation failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .paycrunch.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".paycrunch.toml");

    if path.exists() {
        eprintln!("⚠️  .paycrunch.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .paycrunch.toml")?;

    println!("✅ Created .paycrunch.toml with default settings.");
    println!("   Edit it to customize the source and destination folders.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the aggregation workflow and print the outcome.
fn run(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Handle --dry-run: scan files and exit
    if args.dry_run {
        return handle_dry_run(&config);
    }

    println!(
        "📥 Merging salary records from: {}",
        config.job.source_folder.display()
    );

    match pipeline::run(&config)? {
        RunOutcome::SourceFolderMissing => {
            eprintln!(
                "Error: Folder '{}' does not exist.",
                config.job.source_folder.display()
            );
        }
        RunOutcome::NoSalaryData => {
            eprintln!("No salary data found in the files.");
        }
        RunOutcome::Completed {
            output_path,
            files_merged,
            files_skipped,
        } => {
            println!("\n📊 Merge Summary:");
            println!("   Files merged: {}", files_merged);
            if files_skipped > 0 {
                println!("   Files skipped (parse errors): {}", files_skipped);
            }
            println!(
                "\n✅ Data from .dat files combined and saved to '{}'.",
                output_path.display()
            );
        }
    }

    Ok(())
}

/// Handle --dry-run: scan files, print what would be merged, exit.
fn handle_dry_run(config: &Config) -> Result<()> {
    println!("\n🔍 Dry run: scanning for .dat files (nothing will be written)...\n");

    let source = &config.job.source_folder;
    if !source.exists() {
        eprintln!("Error: Folder '{}' does not exist.", source.display());
        return Ok(());
    }

    let files = scanner::find_data_files(source)?;

    if files.is_empty() {
        println!("   No .dat files found.");
    } else {
        println!("   Found {} file(s) that would be merged:\n", files.len());
        for file in &files {
            println!("     📄 {}", file.display());
        }
    }

    println!("\n✅ Dry run complete. Nothing was written.");
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .paycrunch.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
