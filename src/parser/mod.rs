//! Tab-delimited input file parsing.
//!
//! Each `.dat` file is a plain-text table: first line column headers,
//! subsequent lines rows, fields separated by a tab character. A row
//! whose field count disagrees with the header is a malformed file.

use crate::models::Table;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Failure to read one `.dat` file into a table.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be opened or read.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not well-formed tab-delimited tabular data.
    #[error("malformed tab-delimited data: {0}")]
    Malformed(#[from] csv::Error),
}

/// Parse one tab-delimited file with a header row into a [`Table`].
///
/// All cell values are kept as strings and passed through unchanged;
/// numeric interpretation happens later in the analysis layer.
pub fn parse_dat_file(path: &Path) -> Result<Table, ParseError> {
    let file = File::open(path)?;

    let mut reader = ReaderBuilder::new().delimiter(b'\t').from_reader(file);

    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let mut table = Table::new(columns);

    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(|field| Some(field.to_string())).collect());
    }

    Ok(table)
}
