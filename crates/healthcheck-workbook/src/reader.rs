//! Spreadsheet reading.
//!
//! Every sheet becomes a [`Table`] whose first row is the header. Cells keep
//! their native type (number, text, boolean, date); typed interpretation is
//! left to the validator.

use crate::error::{WorkbookError, WorkbookResult};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use healthcheck_core::{Table, Value, Workbook};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the optional sheet carrying the template marker string.
pub const META_SHEET: &str = "Meta";

/// A parsed document plus the metadata marker, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedWorkbook {
    /// All sheets in document order.
    pub workbook: Workbook,
    /// Contents of the first data cell of the `Meta` sheet, or of its
    /// header cell when it has no data rows.
    pub metadata: Option<String>,
}

/// Reads a spreadsheet from memory.
///
/// The container format (xlsx, xlsm, xlsb, xls, ods) is sniffed from the
/// bytes. A sheet that cannot be parsed is kept as an empty table so one bad
/// sheet does not hide the others.
///
/// # Errors
///
/// Returns [`WorkbookError::Read`] when the bytes are not a spreadsheet.
pub fn read_workbook(bytes: &[u8]) -> WorkbookResult<LoadedWorkbook> {
    let mut source =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| WorkbookError::read(e.to_string()))?;

    let mut workbook = Workbook::new();
    for name in source.sheet_names() {
        let table = sheet_table(&name, source.worksheet_range(&name));
        workbook.insert(name, table);
    }

    let metadata = workbook.get(META_SHEET).and_then(meta_marker);
    info!(
        sheets = workbook.len(),
        metadata = metadata.as_deref().unwrap_or(""),
        "workbook loaded"
    );

    Ok(LoadedWorkbook { workbook, metadata })
}

/// Reads a spreadsheet from disk.
///
/// # Errors
///
/// Returns [`WorkbookError::Read`] when the file cannot be read or is not a
/// spreadsheet.
pub fn read_workbook_path(path: impl AsRef<Path>) -> WorkbookResult<LoadedWorkbook> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| WorkbookError::read(format!("{}: {e}", path.display())))?;
    read_workbook(&bytes)
}

/// Table for one parsed sheet; a parse failure yields an empty table.
fn sheet_table<E: std::fmt::Display>(name: &str, range: Result<Range<Data>, E>) -> Table {
    let table = match range {
        Ok(range) => range_to_table(&range),
        Err(e) => {
            warn!(sheet = name, error = %e, "sheet could not be parsed, treating it as empty");
            Table::default()
        }
    };
    debug!(sheet = name, rows = table.len(), columns = table.width(), "read sheet");
    table
}

/// Template marker from the `Meta` sheet.
///
/// Normally the first cell of the first data row (A2). When the sheet has
/// no data rows, the header cell A1 is used instead, so a `Meta` sheet
/// holding a single cell still yields a marker. Blank markers and
/// positional `Unnamed: N` headers yield `None`.
fn meta_marker(meta: &Table) -> Option<String> {
    let marker = match meta.row(0) {
        Some(row) => row.first().map(ToString::to_string),
        None => meta
            .columns()
            .first()
            .filter(|h| !h.starts_with(UNNAMED_PREFIX))
            .cloned(),
    }?;
    let marker = marker.trim();
    (!marker.is_empty()).then(|| marker.to_string())
}

const UNNAMED_PREFIX: &str = "Unnamed: ";

fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Table::default();
    };

    let mut table = Table::new(header_names(header_row));
    for row in rows {
        if row.iter().all(is_blank) {
            continue;
        }
        table.push_row(row.iter().map(to_value).collect());
    }
    table
}

/// Trims headers, names blank ones positionally and de-duplicates repeats
/// with a `.N` suffix.
fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(row.len());

    for (i, cell) in row.iter().enumerate() {
        let raw = to_value(cell).to_string();
        let base = match raw.trim() {
            "" => format!("{UNNAMED_PREFIX}{i}"),
            trimmed => trimmed.to_string(),
        };

        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Empty,
        Data::String(s) => Value::Text(s.clone()),
        Data::Float(f) => Value::Number(*f),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if dt.is_datetime() => Value::Date(ndt),
            _ => Value::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s).map_or_else(|| Value::Text(s.clone()), Value::Date),
        Data::DurationIso(s) => Value::Text(s.clone()),
    }
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook as XlsxWorkbook};

    fn equity_fixture() -> Vec<u8> {
        let mut wb = XlsxWorkbook::new();

        let meta = wb.add_worksheet();
        meta.set_name("Meta").unwrap();
        meta.write_string(0, 0, "Template").unwrap();
        meta.write_string(1, 0, "Template v2.0 - EquityAssetList").unwrap();

        let sheet = wb.add_worksheet();
        sheet.set_name("EquityAssetList").unwrap();
        sheet.write_string(0, 0, " Asset (Security Name) ").unwrap();
        sheet.write_string(0, 1, "Market Value (USD)").unwrap();
        sheet.write_string(0, 3, "Weight %").unwrap();
        sheet.write_string(0, 4, "Weight %").unwrap();
        sheet.write_string(1, 0, "Apple").unwrap();
        sheet.write_number(1, 1, 600.0).unwrap();
        sheet.write_number(1, 3, 60.0).unwrap();
        sheet.write_string(3, 0, "Nestle").unwrap();
        sheet.write_number(3, 1, 400.0).unwrap();
        sheet.write_number(3, 3, 40.0).unwrap();

        wb.save_to_buffer().unwrap()
    }

    #[test]
    fn test_read_sheets_and_metadata() {
        let loaded = read_workbook(&equity_fixture()).unwrap();

        assert_eq!(loaded.workbook.sheet_names(), vec!["Meta", "EquityAssetList"]);
        assert_eq!(
            loaded.metadata.as_deref(),
            Some("Template v2.0 - EquityAssetList")
        );
    }

    #[test]
    fn test_headers_trimmed_named_and_deduplicated() {
        let loaded = read_workbook(&equity_fixture()).unwrap();
        let table = loaded.workbook.get("EquityAssetList").unwrap();

        assert_eq!(
            table.columns(),
            &[
                "Asset (Security Name)",
                "Market Value (USD)",
                "Unnamed: 2",
                "Weight %",
                "Weight %.1"
            ]
        );
    }

    #[test]
    fn test_blank_rows_dropped() {
        let loaded = read_workbook(&equity_fixture()).unwrap();
        let table = loaded.workbook.get("EquityAssetList").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.cell(1, "Asset (Security Name)"),
            Some(&Value::from("Nestle"))
        );
        assert_eq!(table.cell(1, "Market Value (USD)"), Some(&Value::from(400.0)));
        assert_eq!(table.cell(0, "Unnamed: 2"), Some(&Value::Empty));
    }

    #[test]
    fn test_dates_read_as_dates() {
        let mut wb = XlsxWorkbook::new();
        let sheet = wb.add_worksheet();
        sheet.set_name("FixedIncomeAssetList").unwrap();
        sheet.write_string(0, 0, "Maturity Date").unwrap();
        let date = ExcelDateTime::from_ymd(2031, 6, 30).unwrap();
        let fmt = Format::new().set_num_format("yyyy-mm-dd");
        sheet.write_datetime_with_format(1, 0, &date, &fmt).unwrap();
        let bytes = wb.save_to_buffer().unwrap();

        let loaded = read_workbook(&bytes).unwrap();
        let table = loaded.workbook.get("FixedIncomeAssetList").unwrap();
        let expected = NaiveDate::from_ymd_opt(2031, 6, 30).unwrap();
        assert_eq!(table.cell(0, "Maturity Date").unwrap().as_date(), Some(expected));
        assert!(loaded.metadata.is_none());
    }

    #[test]
    fn test_meta_marker_in_header_cell() {
        let mut wb = XlsxWorkbook::new();
        let meta = wb.add_worksheet();
        meta.set_name("Meta").unwrap();
        meta.write_string(0, 0, "Pastor template").unwrap();
        let bytes = wb.save_to_buffer().unwrap();

        let loaded = read_workbook(&bytes).unwrap();
        assert_eq!(loaded.metadata.as_deref(), Some("Pastor template"));
    }

    #[test]
    fn test_empty_sheet_is_empty_table() {
        let mut wb = XlsxWorkbook::new();
        wb.add_worksheet().set_name("PortfolioMaster").unwrap();
        let bytes = wb.save_to_buffer().unwrap();

        let loaded = read_workbook(&bytes).unwrap();
        let table = loaded.workbook.get("PortfolioMaster").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);
    }

    #[test]
    fn test_unparseable_sheet_is_empty_table() {
        let table = sheet_table("Broken", Err::<Range<Data>, _>("corrupt sheet XML"));
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);

        let mut range = Range::new((0, 0), (1, 0));
        range.set_value((0, 0), Data::String("Rating".into()));
        range.set_value((1, 0), Data::String("AA".into()));
        let table = sheet_table("FixedIncomeAssetList", Ok::<_, String>(range));
        assert_eq!(table.columns(), &["Rating"]);
        assert_eq!(table.cell(0, "Rating"), Some(&Value::from("AA")));
    }

    #[test]
    fn test_meta_without_data_rows_uses_header() {
        let meta = Table::new(["EquityAssetList v2"]);
        assert_eq!(meta_marker(&meta).as_deref(), Some("EquityAssetList v2"));
        assert_eq!(meta_marker(&Table::new(["Unnamed: 0"])), None);
        assert_eq!(meta_marker(&Table::default()), None);
    }

    #[test]
    fn test_not_a_spreadsheet() {
        let err = read_workbook(b"Asset Class,USD Total\nEquity,600\n").unwrap_err();
        assert!(matches!(err, WorkbookError::Read { .. }));
    }

    #[test]
    fn test_read_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("equity.xlsx");
        std::fs::write(&path, equity_fixture()).unwrap();

        let loaded = read_workbook_path(&path).unwrap();
        assert_eq!(loaded.workbook.len(), 2);

        let missing = read_workbook_path(dir.path().join("missing.xlsx")).unwrap_err();
        assert!(missing.to_string().contains("missing.xlsx"));
    }
}
