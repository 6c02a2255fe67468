//! Column lookups by candidate header.

use healthcheck_core::{numeric_values, text_values, Column, Table};

/// Finds the first candidate header present in the table.
///
/// Returns the candidate (not the stored header) so output tables carry the
/// canonical spelling.
#[must_use]
pub fn find_column<'t>(
    table: &'t Table,
    candidates: &[&'static str],
) -> Option<(&'static str, Column<'t>)> {
    candidates
        .iter()
        .find_map(|&c| table.column(c).map(|col| (c, col)))
}

/// Lenient numeric view of the first matching column.
#[must_use]
pub fn numeric_column(table: &Table, candidates: &[&'static str]) -> Option<Vec<Option<f64>>> {
    find_column(table, candidates).map(|(_, col)| numeric_values(&col))
}

/// Lenient text view of the first matching column.
#[must_use]
pub fn text_column(table: &Table, candidates: &[&'static str]) -> Option<Vec<Option<String>>> {
    find_column(table, candidates).map(|(_, col)| text_values(&col))
}

/// Replaces missing entries with zero.
#[must_use]
pub fn or_zero(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(0.0)).collect()
}
