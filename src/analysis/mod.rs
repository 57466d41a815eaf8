//! Salary statistics and derived columns.
//!
//! This module provides numeric coercion over table columns and the
//! summary computations: mean, second-highest value, and the derived
//! gross-salary column.

use crate::models::Table;
use thiserror::Error;

/// Column holding the base compensation figure.
pub const BASIC_SALARY: &str = "basic_salary";
/// Column holding additional compensation.
pub const ALLOWANCES: &str = "allowances";
/// Derived column: basic salary plus allowances.
pub const GROSS_SALARY: &str = "gross_salary";

/// A required column is absent from a parsed table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("column '{0}' not found")]
pub struct MissingColumn(pub String);

/// Extract a column as numbers, coercing each cell.
///
/// Cells that cannot be coerced (empty, non-numeric, absent) become
/// `None`, the missing-value marker. The output holds one entry per
/// row, missing values included.
pub fn numeric_column(table: &Table, name: &str) -> Result<Vec<Option<f64>>, MissingColumn> {
    let index = table
        .column_index(name)
        .ok_or_else(|| MissingColumn(name.to_string()))?;

    Ok(table
        .rows
        .iter()
        .map(|row| row.get(index).and_then(|cell| cell.as_deref()).and_then(coerce))
        .collect())
}

/// Coerce one raw cell to a finite number.
fn coerce(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Arithmetic mean of the valid values, ignoring missing ones.
///
/// Returns `None` when the column holds no valid values.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let valid: Vec<f64> = values.iter().flatten().copied().collect();
    if valid.is_empty() {
        return None;
    }
    Some(valid.iter().sum::<f64>() / valid.len() as f64)
}

/// Second-largest valid value.
///
/// With a single valid value the result is that value; with none the
/// result is undefined (`None`).
pub fn second_highest(values: &[Option<f64>]) -> Option<f64> {
    let mut valid: Vec<f64> = values.iter().flatten().copied().collect();
    valid.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    match valid.len() {
        0 => None,
        1 => Some(valid[0]),
        _ => Some(valid[1]),
    }
}

/// Append the gross-salary column: basic salary plus allowances,
/// element-wise. A row with either operand missing gets a missing
/// gross value (empty cell on output).
pub fn add_gross_salary(table: &mut Table) -> Result<(), MissingColumn> {
    let basic = numeric_column(table, BASIC_SALARY)?;
    let allowances = numeric_column(table, ALLOWANCES)?;

    let cells = basic
        .iter()
        .zip(&allowances)
        .map(|(b, a)| match (b, a) {
            (Some(b), Some(a)) => Some(format_number(b + a)),
            _ => None,
        })
        .collect();

    table.push_column(GROSS_SALARY, cells);
    Ok(())
}

/// Render a computed number as a cell value. Integral values print
/// without a fractional part, matching the way the integer-valued
/// source columns read back in.
fn format_number(value: f64) -> String {
    value.to_string()
}
