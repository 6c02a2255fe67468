//! Sheet resolution.

use crate::error::{WorkbookError, WorkbookResult};
use healthcheck_core::{Table, TemplateKind, Workbook};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// The positions sheet exists but holds no data rows.
///
/// This is an outcome, not an error: the run stops without a result and the
/// user is pointed at a sample template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptySheetWarning {
    /// Name of the empty sheet as it appears in the document.
    pub sheet: String,
    /// Kind the sheet was resolved for.
    pub kind: TemplateKind,
}

impl EmptySheetWarning {
    /// User-facing guidance.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Sheet '{}' is present but has 0 rows. Download a sample {} template, \
             fill it with your positions and upload it again.",
            self.sheet, self.kind
        )
    }
}

impl fmt::Display for EmptySheetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Outcome of resolving the positions sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetResolution<'a> {
    /// A sheet with at least one data row.
    Found {
        /// Sheet name as stored in the workbook.
        name: &'a str,
        /// The sheet contents.
        table: &'a Table,
    },
    /// The sheet exists but is empty.
    Empty(EmptySheetWarning),
}

/// Finds the table to validate for `kind`.
///
/// Lookup order: exact canonical name, canonical name ignoring case and
/// surrounding whitespace, then the legacy alias (PortfolioMaster only,
/// matched the same way). Names are normalized as in [`detect`](crate::detect()).
///
/// # Errors
///
/// Returns [`WorkbookError::MissingSheet`] when no candidate exists.
pub fn resolve_sheet(workbook: &Workbook, kind: TemplateKind) -> WorkbookResult<SheetResolution<'_>> {
    let expected = kind.sheet_name();

    let found = workbook
        .iter()
        .find(|s| s.name == expected)
        .map(|s| (s.name.as_str(), &s.table))
        .or_else(|| find_loose(workbook, expected))
        .or_else(|| {
            kind.legacy_sheet_alias()
                .and_then(|alias| find_loose(workbook, alias))
        });

    let Some((name, table)) = found else {
        let available = workbook.sheet_names().iter().map(|n| n.to_string()).collect();
        return Err(WorkbookError::missing_sheet(expected, available));
    };

    if table.is_empty() {
        warn!(sheet = name, %kind, "resolved sheet has no rows");
        return Ok(SheetResolution::Empty(EmptySheetWarning {
            sheet: name.to_string(),
            kind,
        }));
    }

    debug!(sheet = name, rows = table.len(), "resolved positions sheet");
    Ok(SheetResolution::Found { name, table })
}

/// Sheet whose trimmed name equals `name`, ignoring case.
fn find_loose<'a>(workbook: &'a Workbook, name: &str) -> Option<(&'a str, &'a Table)> {
    workbook
        .iter()
        .find(|s| s.name.trim().eq_ignore_ascii_case(name))
        .map(|s| (s.name.as_str(), &s.table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthcheck_core::Value;

    fn positions() -> Table {
        Table::with_rows(
            ["Asset Class", "USD Total"],
            vec![vec![Value::from("Equity"), Value::from(600.0)]],
        )
    }

    #[test]
    fn test_exact_match() {
        let wb = Workbook::new()
            .with_sheet("equityassetlist", Table::default())
            .with_sheet("EquityAssetList", positions());

        match resolve_sheet(&wb, TemplateKind::EquityAssetList).unwrap() {
            SheetResolution::Found { name, table } => {
                assert_eq!(name, "EquityAssetList");
                assert_eq!(table.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_case_insensitive_match() {
        let wb = Workbook::new().with_sheet("portfoliomaster", positions());
        let res = resolve_sheet(&wb, TemplateKind::PortfolioMaster).unwrap();
        assert!(matches!(res, SheetResolution::Found { name: "portfoliomaster", .. }));
    }

    #[test]
    fn test_padded_name_matches_detection() {
        let wb = Workbook::new().with_sheet("FixedIncomeAssetList ", positions());
        assert_eq!(
            crate::detect::detect(&wb, None).kind,
            TemplateKind::FixedIncomeAssetList
        );

        let res = resolve_sheet(&wb, TemplateKind::FixedIncomeAssetList).unwrap();
        assert!(matches!(
            res,
            SheetResolution::Found { name: "FixedIncomeAssetList ", .. }
        ));

        let wb = Workbook::new().with_sheet("  pastor", positions());
        let res = resolve_sheet(&wb, TemplateKind::PortfolioMaster).unwrap();
        assert!(matches!(res, SheetResolution::Found { name: "  pastor", .. }));
    }

    #[test]
    fn test_legacy_alias() {
        let wb = Workbook::new().with_sheet("PASTOR", positions());
        let res = resolve_sheet(&wb, TemplateKind::PortfolioMaster).unwrap();
        assert!(matches!(res, SheetResolution::Found { name: "PASTOR", .. }));

        // The alias only applies to PortfolioMaster.
        let err = resolve_sheet(&wb, TemplateKind::EquityAssetList).unwrap_err();
        assert!(matches!(err, WorkbookError::MissingSheet { .. }));
    }

    #[test]
    fn test_missing_sheet_names_expected() {
        let wb = Workbook::new().with_sheet("Sheet1", positions());
        let err = resolve_sheet(&wb, TemplateKind::FixedIncomeAssetList).unwrap_err();
        assert_eq!(
            err,
            WorkbookError::missing_sheet("FixedIncomeAssetList", vec!["Sheet1".to_string()])
        );
    }

    #[test]
    fn test_empty_sheet_warning() {
        let wb = Workbook::new().with_sheet("EquityAssetList", Table::new(["Weight %"]));
        let res = resolve_sheet(&wb, TemplateKind::EquityAssetList).unwrap();
        let SheetResolution::Empty(warning) = res else {
            panic!("expected empty sheet");
        };
        assert_eq!(warning.sheet, "EquityAssetList");
        assert!(warning.to_string().contains("0 rows"));
    }
}
