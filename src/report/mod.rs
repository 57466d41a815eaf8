//! Combined CSV output generation.
//!
//! This module builds the summary footer row, appends it to the data
//! table, and serializes the result as comma-delimited CSV.

use crate::models::Table;
use anyhow::Result;
use csv::WriterBuilder;
use std::path::Path;

/// Build the textual footer cells from the summary statistics.
///
/// The average is always present; the second-highest field is included
/// whenever the value is defined, zero included. An undefined average
/// (no valid salary values in the table) formats as `NaN`.
pub fn footer_cells(average: Option<f64>, second_highest: Option<f64>) -> Vec<String> {
    let mut cells = vec![format!(
        "Average Salary: {:.2}",
        average.unwrap_or(f64::NAN)
    )];

    if let Some(second) = second_highest {
        cells.push(format!("Second Highest Salary: {:.2}", second));
    }

    cells
}

/// Append the footer as a trailing row.
///
/// Footer values occupy the first columns; the remaining columns of
/// that row are left empty. The footer does not conform to the table
/// schema and is not meant to.
pub fn append_footer(mut table: Table, footer: &[String]) -> Table {
    let mut row: Vec<Option<String>> = footer.iter().cloned().map(Some).collect();
    while row.len() < table.columns.len() {
        row.push(None);
    }
    table.push_row(row);
    table
}

/// Serialize the table as comma-delimited CSV with a header row.
///
/// Missing cells render as empty fields. An existing file at `path`
/// is overwritten.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_path(path)?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_footer_cells_with_both_statistics() {
        let cells = footer_cells(Some(2000.0), Some(1000.0));
        assert_eq!(
            cells,
            vec![
                "Average Salary: 2000.00".to_string(),
                "Second Highest Salary: 1000.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_footer_cells_omits_undefined_second_highest() {
        let cells = footer_cells(Some(500.0), None);
        assert_eq!(cells, vec!["Average Salary: 500.00".to_string()]);
    }

    #[test]
    fn test_footer_cells_includes_zero_second_highest() {
        let cells = footer_cells(Some(50.0), Some(0.0));
        assert_eq!(cells[1], "Second Highest Salary: 0.00");
    }

    #[test]
    fn test_append_footer_pads_to_column_width() {
        let mut table = Table::new(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        table.push_row(vec![
            Some("1".to_string()),
            Some("2".to_string()),
            Some("3".to_string()),
        ]);

        let combined = append_footer(table, &["Average Salary: 1.00".to_string()]);

        let footer = combined.rows.last().unwrap();
        assert_eq!(footer.len(), 3);
        assert_eq!(footer[0], Some("Average Salary: 1.00".to_string()));
        assert_eq!(footer[1], None);
        assert_eq!(footer[2], None);
    }

    #[test]
    fn test_write_csv_renders_missing_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.csv");

        let mut table = Table::new(vec!["name".to_string(), "gross_salary".to_string()]);
        table.push_row(vec![Some("alice".to_string()), Some("1100".to_string())]);
        table.push_row(vec![Some("bob".to_string()), None]);

        write_csv(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "name,gross_salary\nalice,1100\nbob,\n");
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.csv");
        fs::write(&path, "stale contents").unwrap();

        let mut table = Table::new(vec!["x".to_string()]);
        table.push_row(vec![Some("1".to_string())]);
        write_csv(&table, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "x\n1\n");
    }
}
