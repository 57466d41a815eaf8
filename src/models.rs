//! Data models for the salary batch aggregator.
//!
//! This module contains the core data structures shared across the
//! scanner, parser, analysis, and report modules.

use std::path::PathBuf;

/// A loosely typed tabular dataset parsed from one input file.
///
/// Rows are vectors of optional cells aligned with `columns`. The loose
/// typing is deliberate: the output table ends with a summary footer row
/// that does not conform to the column schema (its values occupy the
/// first columns, the remainder are empty), so a strict per-column
/// record type would reject it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names, in input order.
    pub columns: Vec<String>,
    /// Data rows. Each row holds one optional cell per column;
    /// `None` renders as an empty field on output.
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Creates an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Returns the index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Appends a data row.
    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    /// Appends a new column with one cell per existing row.
    ///
    /// `cells` must hold exactly one entry per row; extra entries are
    /// ignored and short input leaves trailing rows without a cell.
    pub fn push_column(&mut self, name: &str, cells: Vec<Option<String>>) {
        self.columns.push(name.to_string());
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.push(cell);
        }
    }

    /// Returns the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The source folder does not exist; nothing was written.
    SourceFolderMissing,
    /// No salary values were collected from any file; nothing was written.
    NoSalaryData,
    /// The combined CSV was written.
    Completed {
        /// Full path of the written CSV file.
        output_path: PathBuf,
        /// Number of files whose rows were successfully parsed.
        files_merged: usize,
        /// Number of files skipped due to parse errors.
        files_skipped: usize,
    },
}
