//! Table and bundle export to `.xlsx`.

use crate::error::{ReportError, ReportResult};
use crate::sheet_name::SheetNames;
use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};
use healthcheck_core::{Table, Value};
use healthcheck_portfolio::{Metric, ResultBundle};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

/// Name of the worksheet holding the headline metrics.
pub const SUMMARY_SHEET: &str = "Summary";

const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Builds a report workbook from named tables.
///
/// Sheet names are sanitized and de-duplicated in insertion order.
pub struct ReportBuilder {
    workbook: Workbook,
    names: SheetNames,
    header: Format,
    date: Format,
    sheets: usize,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            names: SheetNames::default(),
            header: Format::new().set_bold(),
            date: Format::new().set_num_format("yyyy-mm-dd"),
            sheets: 0,
        }
    }

    /// Adds one worksheet per table, header in the first row.
    ///
    /// # Errors
    ///
    /// Fails if the table exceeds worksheet limits or the writer rejects it.
    pub fn add_table(&mut self, name: &str, table: &Table) -> ReportResult<&mut Self> {
        let rows = table.len() + 1;
        if rows > MAX_ROWS || table.width() > MAX_COLS {
            return Err(ReportError::too_large(name, rows, table.width()));
        }

        let sheet_name = self.names.claim(name);
        let sheet = self.workbook.add_worksheet();
        sheet.set_name(&sheet_name)?;

        for (c, header) in table.columns().iter().enumerate() {
            sheet.write_string_with_format(0, col(c), header, &self.header)?;
        }
        for (r, row) in table.rows().enumerate() {
            for (c, value) in row.iter().enumerate() {
                write_cell(sheet, row_num(r + 1), col(c), value, &self.date)?;
            }
        }
        sheet.autofit();

        debug!(sheet = %sheet_name, rows = table.len(), "worksheet written");
        self.sheets += 1;
        Ok(self)
    }

    /// Adds a `Summary` worksheet with one `[Metric, Value]` row per metric.
    ///
    /// # Errors
    ///
    /// Fails if the writer rejects the sheet.
    pub fn add_metrics<'a>(
        &mut self,
        metrics: impl IntoIterator<Item = (&'a str, Metric)>,
    ) -> ReportResult<&mut Self> {
        let rows = metrics
            .into_iter()
            .map(|(name, m)| {
                let value = match m {
                    Metric::Count(n) => Value::from(n as f64),
                    Metric::Value(v) => Value::from(v),
                };
                vec![Value::from(name), value]
            })
            .collect();
        self.add_table(SUMMARY_SHEET, &Table::with_rows(["Metric", "Value"], rows))
    }

    /// Number of worksheets added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sheets
    }

    /// Returns true if no worksheet was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets == 0
    }

    /// Serializes the report.
    ///
    /// # Errors
    ///
    /// Fails if the writer cannot assemble the file.
    pub fn to_bytes(mut self) -> ReportResult<Vec<u8>> {
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Writes the report to `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be assembled or written.
    pub fn save(self, path: impl AsRef<Path>) -> ReportResult<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)
            .map_err(|e| ReportError::io(path.display().to_string(), e.to_string()))?;
        info!(path = %path.display(), "report written");
        Ok(())
    }
}

/// Renders a result bundle: `Summary` first, then one sheet per table in
/// bundle order.
///
/// # Errors
///
/// Fails if any table cannot be written.
pub fn bundle_report(bundle: &ResultBundle) -> ReportResult<ReportBuilder> {
    let mut report = ReportBuilder::new();
    report.add_metrics(bundle.metrics().iter())?;
    for (key, table) in bundle.tables() {
        report.add_table(key, table)?;
    }
    info!(
        kind = %bundle.kind(),
        sheets = report.len(),
        "bundle report assembled"
    );
    Ok(report)
}

/// [`bundle_report`] serialized to `.xlsx` bytes.
///
/// # Errors
///
/// Fails if the report cannot be written.
pub fn write_bundle(bundle: &ResultBundle) -> ReportResult<Vec<u8>> {
    bundle_report(bundle)?.to_bytes()
}

/// [`bundle_report`] saved to `path`.
///
/// # Errors
///
/// Fails if the report cannot be written.
pub fn write_bundle_path(bundle: &ResultBundle, path: impl AsRef<Path>) -> ReportResult<()> {
    bundle_report(bundle)?.save(path)
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    date_format: &Format,
) -> ReportResult<()> {
    match value {
        Value::Empty => {}
        Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) if n.is_finite() => {
            sheet.write_number(row, col, *n)?;
        }
        Value::Number(n) => {
            sheet.write_string(row, col, n.to_string())?;
        }
        Value::Date(dt) => match excel_datetime(dt) {
            Some(excel) => {
                sheet.write_datetime_with_format(row, col, &excel, date_format)?;
            }
            None => {
                sheet.write_string(row, col, value.to_string())?;
            }
        },
        Value::Text(s) => {
            sheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

/// Dates outside the spreadsheet epoch fall back to text.
fn excel_datetime(dt: &NaiveDateTime) -> Option<ExcelDateTime> {
    let year = u16::try_from(dt.year()).ok()?;
    let date = ExcelDateTime::from_ymd(year, dt.month() as u8, dt.day() as u8).ok()?;
    if dt.time() == NaiveTime::MIN {
        return Some(date);
    }
    date.and_hms(dt.hour() as u16, dt.minute() as u8, dt.second()).ok()
}

// Bounds are checked in `add_table`.
#[allow(clippy::cast_possible_truncation)]
fn row_num(r: usize) -> u32 {
    r as u32
}

#[allow(clippy::cast_possible_truncation)]
fn col(c: usize) -> u16 {
    c as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_excel_datetime_range() {
        let d = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap().and_time(NaiveTime::MIN);
        assert!(excel_datetime(&d).is_some());

        let ancient = NaiveDate::from_ymd_opt(1800, 1, 1).unwrap().and_time(NaiveTime::MIN);
        assert!(excel_datetime(&ancient).is_none());
    }

    #[test]
    fn test_builder_counts_sheets() {
        let mut report = ReportBuilder::new();
        assert!(report.is_empty());
        report
            .add_table("by_fx", &Table::new(["FX", "USD Total"]))
            .unwrap()
            .add_table("by_fx", &Table::new(["FX", "USD Total"]))
            .unwrap();
        assert_eq!(report.len(), 2);
        assert!(!report.to_bytes().unwrap().is_empty());
    }
}
