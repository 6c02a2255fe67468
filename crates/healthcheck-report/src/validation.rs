//! Validation failure reports.

use crate::error::ReportResult;
use crate::writer::ReportBuilder;
use healthcheck_core::{Table, Value};
use healthcheck_schema::ValidationError;
use std::path::Path;

/// Name of the validation report worksheet.
pub const VALIDATION_SHEET: &str = "Validation";

/// Failures as a `[column, index, failure]` table.
///
/// Table-level failures leave `column` empty; failures not tied to a row
/// leave `index` empty.
#[must_use]
pub fn validation_table(errors: &[ValidationError]) -> Table {
    let rows = errors
        .iter()
        .map(|e| {
            vec![
                Value::from(e.column.clone()),
                Value::from(e.index.map(|i| i as f64)),
                Value::from(e.failure.as_str()),
            ]
        })
        .collect();
    Table::with_rows(["column", "index", "failure"], rows)
}

/// Single-sheet report of validation failures.
///
/// # Errors
///
/// Fails if the writer rejects the sheet.
pub fn validation_report(errors: &[ValidationError]) -> ReportResult<ReportBuilder> {
    let mut report = ReportBuilder::new();
    report.add_table(VALIDATION_SHEET, &validation_table(errors))?;
    Ok(report)
}

/// [`validation_report`] serialized to `.xlsx` bytes.
///
/// # Errors
///
/// Fails if the report cannot be written.
pub fn write_validation(errors: &[ValidationError]) -> ReportResult<Vec<u8>> {
    validation_report(errors)?.to_bytes()
}

/// [`validation_report`] saved to `path`.
///
/// # Errors
///
/// Fails if the report cannot be written.
pub fn write_validation_path(
    errors: &[ValidationError],
    path: impl AsRef<Path>,
) -> ReportResult<()> {
    validation_report(errors)?.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_table() {
        let errors = vec![
            ValidationError::cell("USD Total", 3, "value -5 is negative (must be >= 0)"),
            ValidationError::column("USD Total", "missing required column"),
            ValidationError::table("Weight % does not sum to ~100% (±0.5): total is 97.00."),
        ];
        let t = validation_table(&errors);

        assert_eq!(t.columns(), &["column", "index", "failure"]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.cell(0, "column"), Some(&Value::from("USD Total")));
        assert_eq!(t.cell(0, "index"), Some(&Value::from(3.0)));
        assert_eq!(t.cell(1, "index"), Some(&Value::Empty));
        assert_eq!(t.cell(2, "column"), Some(&Value::Empty));
    }

    #[test]
    fn test_empty_report_has_header() {
        let t = validation_table(&[]);
        assert!(t.is_empty());
        assert_eq!(t.width(), 3);
    }
}
