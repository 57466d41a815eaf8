//! Input file discovery.
//!
//! This module enumerates salary record files directly inside the
//! source folder. Enumeration is single-level; subdirectories are
//! not descended into.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filename suffix selecting salary record files.
pub const DATA_SUFFIX: &str = ".dat";

/// Enumerate `.dat` files directly inside `source_folder`.
///
/// Only regular files whose name ends in `.dat` are selected. Entries
/// come back in whatever order the filesystem yields them; no sort is
/// applied, so the order is not guaranteed across platforms.
pub fn find_data_files(source_folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(source_folder).with_context(|| {
        format!(
            "Failed to read source folder: {}",
            source_folder.display()
        )
    })?;

    let mut files = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if !name.ends_with(DATA_SUFFIX) {
            debug!("Skipping non-data entry: {}", name);
            continue;
        }

        if !path.is_file() {
            debug!("Skipping non-file entry: {}", name);
            continue;
        }

        files.push(path);
    }

    Ok(files)
}
