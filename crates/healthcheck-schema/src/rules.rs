//! Cross-column business rules.
//!
//! Rules only read columns that are present; a rule whose inputs are missing
//! is skipped.

use crate::validator::{ValidationConfig, ValidationError};
use healthcheck_core::{coerce_value, date_values, SemanticType, Table, TemplateKind};
use tracing::debug;

const WEIGHT: &str = "Weight %";
const ISSUE_DATE: &str = "Issue Date";
const MATURITY_DATE: &str = "Maturity Date";

pub(crate) fn apply(
    table: &Table,
    kind: TemplateKind,
    config: &ValidationConfig,
    errors: &mut Vec<ValidationError>,
) {
    if matches!(
        kind,
        TemplateKind::EquityAssetList | TemplateKind::FixedIncomeAssetList
    ) {
        errors.extend(weight_total(table, config.weight_sum_tolerance));
    }
    if kind == TemplateKind::FixedIncomeAssetList {
        errors.extend(maturity_after_issue(table));
    }
}

/// `Weight %` must total 100 within `tolerance`. Blank and uncoercible cells
/// count as zero.
fn weight_total(table: &Table, tolerance: f64) -> Option<ValidationError> {
    let column = table.column(WEIGHT)?;
    let total: f64 = column
        .values()
        .filter_map(|v| coerce_value(v, SemanticType::Number))
        .filter_map(|c| c.as_f64())
        .sum();
    debug!(total, tolerance, "weight total");

    ((total - 100.0).abs() > tolerance).then(|| {
        ValidationError::table(format!(
            "Weight % does not sum to ~100% (±{tolerance}): total is {total:.2}."
        ))
    })
}

/// `Maturity Date` must not precede `Issue Date` on rows where both parse.
fn maturity_after_issue(table: &Table) -> Option<ValidationError> {
    let issue = date_values(&table.column(ISSUE_DATE)?);
    let maturity = date_values(&table.column(MATURITY_DATE)?);

    let count = issue
        .iter()
        .zip(&maturity)
        .filter(|(i, m)| matches!((i, m), (Some(i), Some(m)) if m < i))
        .count();

    (count > 0).then(|| {
        ValidationError::table(format!(
            "{count} bond(s) have Maturity Date earlier than Issue Date."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use healthcheck_core::Value;

    fn weights(ws: &[f64]) -> Table {
        Table::with_rows(
            ["Asset (Security Name)", "Market Value (USD)", "Weight %"],
            ws.iter()
                .enumerate()
                .map(|(i, w)| vec![format!("Stock {i}").into(), (w * 10.0).into(), (*w).into()])
                .collect(),
        )
    }

    #[test]
    fn test_weight_total_within_tolerance() {
        let mut errors = Vec::new();
        apply(
            &weights(&[60.0, 40.3]),
            TemplateKind::EquityAssetList,
            &ValidationConfig::default(),
            &mut errors,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_weight_total_outside_tolerance() {
        let mut errors = Vec::new();
        apply(
            &weights(&[50.0, 47.0]),
            TemplateKind::EquityAssetList,
            &ValidationConfig::default(),
            &mut errors,
        );
        assert_eq!(errors.len(), 1);
        assert!(errors[0].column.is_none());
        assert!(errors[0].index.is_none());
        assert!(errors[0].failure.contains("total is 97.00"));
    }

    #[test]
    fn test_weight_rule_ignores_portfolio_master() {
        let mut errors = Vec::new();
        apply(
            &weights(&[10.0]),
            TemplateKind::PortfolioMaster,
            &ValidationConfig::default(),
            &mut errors,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_weights_count_as_zero() {
        let table = Table::with_rows(
            ["Weight %"],
            vec![vec![100.0.into()], vec![Value::Empty], vec!["n/a".into()]],
        );
        assert!(weight_total(&table, 0.5).is_none());
    }

    #[test]
    fn test_maturity_before_issue() {
        let d = |y, m, day| Value::from(NaiveDate::from_ymd_opt(y, m, day).unwrap());
        let table = Table::with_rows(
            ["Rating", "Issue Date", "Maturity Date"],
            vec![
                vec!["AA".into(), d(2020, 1, 1), d(2030, 1, 1)],
                vec!["A".into(), d(2020, 1, 1), d(2019, 1, 1)],
                vec!["BBB".into(), Value::Empty, d(2019, 1, 1)],
                vec!["BB".into(), "2021-05-01".into(), "2021-04-30".into()],
            ],
        );
        let err = maturity_after_issue(&table).unwrap();
        assert_eq!(
            err.failure,
            "2 bond(s) have Maturity Date earlier than Issue Date."
        );
    }

    #[test]
    fn test_rules_skip_missing_columns() {
        let table = Table::with_rows(["Rating"], vec![vec!["AA".into()]]);
        let mut errors = Vec::new();
        apply(
            &table,
            TemplateKind::FixedIncomeAssetList,
            &ValidationConfig::default(),
            &mut errors,
        );
        assert!(errors.is_empty());
    }
}
