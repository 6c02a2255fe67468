//! End-to-end runs over in-memory `.xlsx` fixtures.

use approx::assert_relative_eq;
use healthcheck::{
    DetectionSource, Pipeline, PipelineConfig, PipelineError, PipelineOutcome, Table,
    TemplateKind, ValidationConfig, Value, WorkbookError,
};
use healthcheck_core::Workbook;
use healthcheck_workbook::LoadedWorkbook;
use rust_xlsxwriter::Workbook as XlsxWorkbook;

// =============================================================================
// FIXTURES
// =============================================================================

enum Cell {
    S(&'static str),
    N(f64),
}

struct Fixture {
    workbook: XlsxWorkbook,
}

impl Fixture {
    fn new() -> Self {
        Self {
            workbook: XlsxWorkbook::new(),
        }
    }

    fn meta(self, marker: &str) -> Self {
        self.sheet("Meta", &[marker], &[])
    }

    fn sheet(mut self, name: &str, headers: &[&str], rows: &[Vec<Cell>]) -> Self {
        let sheet = self.workbook.add_worksheet();
        sheet.set_name(name).unwrap();
        for (c, h) in headers.iter().enumerate() {
            sheet.write_string(0, c as u16, *h).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32 + 1, c as u16);
                match cell {
                    Cell::S(s) => sheet.write_string(r, c, *s).unwrap(),
                    Cell::N(n) => sheet.write_number(r, c, *n).unwrap(),
                };
            }
        }
        self
    }

    fn bytes(mut self) -> Vec<u8> {
        self.workbook.save_to_buffer().unwrap()
    }
}

use Cell::{N, S};

const PM_HEADERS: &[&str] = &["Asset Class", "Sub Asset Class", "FX", "USD Total"];

fn portfolio_master() -> Fixture {
    Fixture::new().meta("Template v3 - PortfolioMaster").sheet(
        "PortfolioMaster",
        PM_HEADERS,
        &[
            vec![S("Equity"), S("US Large Cap"), S("USD"), N(600.0)],
            vec![S("Bond"), S("IG Credit"), S("EUR"), N(400.0)],
        ],
    )
}

fn equity(second_weight: f64) -> Vec<u8> {
    Fixture::new()
        .sheet(
            "EquityAssetList",
            &["Asset (Security Name)", "Sector (GICS)", "Market Value (USD)", "Weight %"],
            &[
                vec![S("Apple"), S("Tech"), N(600.0), N(60.0)],
                vec![S("Nestle"), S("Staples"), N(400.0), N(second_weight)],
            ],
        )
        .bytes()
}

// =============================================================================
// OUTCOMES
// =============================================================================

#[test]
fn test_portfolio_master_completes() {
    let run = Pipeline::default().run(&portfolio_master().bytes(), None).unwrap();

    assert_eq!(run.detection.kind, TemplateKind::PortfolioMaster);
    assert_eq!(run.detection.source, DetectionSource::Metadata);
    assert_eq!(run.kind, TemplateKind::PortfolioMaster);
    assert!(!run.overridden());

    let PipelineOutcome::Completed { sheet, bundle } = &run.outcome else {
        panic!("expected a bundle, got {:?}", run.outcome);
    };
    assert_eq!(sheet, "PortfolioMaster");

    let by_ac = bundle.table("by_asset_class").unwrap();
    assert_eq!(by_ac.cell(0, "Asset Class"), Some(&Value::from("Equity")));
    assert_eq!(by_ac.cell(0, "USD Total"), Some(&Value::from(600.0)));
    assert_eq!(by_ac.cell(1, "Asset Class"), Some(&Value::from("Bond")));
    assert_relative_eq!(
        bundle.metrics().get("usd_total_sum").unwrap().as_f64(),
        1_000.0
    );
}

#[test]
fn test_policy_sheets_feed_the_bundle() {
    let bytes = portfolio_master()
        .sheet(
            "Policy",
            &["Asset Class", "Policy Weight %"],
            &[vec![S("Equity"), N(55.0)], vec![S("Bond"), N(45.0)]],
        )
        .sheet(
            "PolicyMeta",
            &["Key", "Value"],
            &[vec![S("ESG_Benchmark_Score"), N(62.5)]],
        )
        .bytes();

    let run = Pipeline::default().run(&bytes, None).unwrap();
    let bundle = run.outcome.bundle().unwrap();

    let policy = bundle.table("policy").unwrap();
    assert_eq!(policy.len(), 2);
    let cmp = bundle.table("policy_compare").unwrap();
    assert_eq!(cmp.cell(1, "Asset Class"), Some(&Value::from("Equity")));
    assert_eq!(cmp.cell(1, "Policy Weight %"), Some(&Value::from(55.0)));

    let esg = bundle.table("esg").unwrap();
    assert_eq!(esg.cell(1, "Value"), Some(&Value::from(62.5)));
}

#[test]
fn test_free_form_liquidity_tiers_complete() {
    let bytes = Fixture::new()
        .sheet(
            "PortfolioMaster",
            &["Asset Class", "Sub Asset Class", "FX", "USD Total", "Liquidity"],
            &[
                vec![S("Equity"), S("Global"), S("USD"), N(700.0), S("Daily")],
                vec![S("Private Equity"), S("Buyout"), S("USD"), N(200.0), S("T+30")],
                vec![S("Hedge Funds"), S("Macro"), S("USD"), N(100.0), S("T+30")],
            ],
        )
        .bytes();

    let run = Pipeline::default().run(&bytes, None).unwrap();
    assert!(run.outcome.errors().is_empty(), "{:?}", run.outcome.errors());

    let liquidity = run.outcome.bundle().unwrap().table("by_liquidity").unwrap();
    assert_eq!(liquidity.len(), 2);
    assert_eq!(liquidity.cell(0, "Liquidity"), Some(&Value::from("Daily")));
    assert_eq!(liquidity.cell(1, "Liquidity"), Some(&Value::from("T+30")));
    assert_eq!(liquidity.cell(1, "USD Total"), Some(&Value::from(300.0)));
}

#[test]
fn test_padded_sheet_name_detects_and_resolves() {
    let table = Table::with_rows(
        ["Rating", "Weight %"],
        vec![vec![Value::from("AA"), Value::from(100.0)]],
    );
    let loaded = LoadedWorkbook {
        workbook: Workbook::new().with_sheet("FixedIncomeAssetList ", table),
        metadata: None,
    };

    let run = Pipeline::default().run_loaded(&loaded, None).unwrap();
    assert_eq!(run.detection.source, DetectionSource::SheetName);
    assert_eq!(run.kind, TemplateKind::FixedIncomeAssetList);
    assert_eq!(run.outcome.sheet(), "FixedIncomeAssetList ");
    assert!(run.outcome.is_completed());
}

#[test]
fn test_equity_weights_off_by_three_is_invalid() {
    let run = Pipeline::default().run(&equity(37.0), None).unwrap();

    assert_eq!(run.detection.source, DetectionSource::SheetName);
    assert_eq!(run.kind, TemplateKind::EquityAssetList);
    let errors = run.outcome.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].column.is_none());
    assert!(errors[0].failure.contains("97.00"));
    assert!(run.outcome.bundle().is_none());
}

#[test]
fn test_validation_tolerance_from_config() {
    let validation = ValidationConfig::default().with_weight_sum_tolerance(5.0);
    let config = PipelineConfig::new().with_validation(validation);
    let run = Pipeline::new(config).run(&equity(37.0), None).unwrap();
    assert!(run.outcome.is_completed());

    let bundle = run.outcome.bundle().unwrap();
    assert_eq!(
        bundle.keys().collect::<Vec<_>>(),
        vec!["metrics", "by_sector", "by_region", "top_positions"]
    );
}

#[test]
fn test_empty_sheet_is_an_outcome() {
    let bytes = Fixture::new()
        .sheet(
            "FixedIncomeAssetList",
            &["Rating", "Modified Duration", "Weight %"],
            &[],
        )
        .bytes();

    let run = Pipeline::default().run(&bytes, None).unwrap();
    assert_eq!(run.kind, TemplateKind::FixedIncomeAssetList);
    let PipelineOutcome::EmptySheet(warning) = &run.outcome else {
        panic!("expected an empty sheet warning");
    };
    assert_eq!(warning.sheet, "FixedIncomeAssetList");
    assert!(warning.message().contains("0 rows"));
    assert!(run.outcome.bundle().is_none());
}

#[test]
fn test_fixed_income_duration_bucket() {
    let bytes = Fixture::new()
        .sheet(
            "FixedIncomeAssetList",
            &["Rating", "Modified Duration", "Weight %"],
            &[vec![S("AA"), N(3.0), N(100.0)]],
        )
        .bytes();

    let run = Pipeline::default().run(&bytes, None).unwrap();
    let bundle = run.outcome.bundle().unwrap();
    let buckets = bundle.table("duration_buckets").unwrap();
    assert_eq!(buckets.cell(2, "Bucket"), Some(&Value::from("3-5")));
    assert_eq!(buckets.cell(2, "Weight %"), Some(&Value::from(100.0)));
}

// =============================================================================
// OVERRIDES & ERRORS
// =============================================================================

#[test]
fn test_override_replaces_detected_kind() {
    let bytes = portfolio_master()
        .sheet(
            "EquityAssetList",
            &["Asset (Security Name)", "Market Value (USD)"],
            &[vec![S("Apple"), N(100.0)]],
        )
        .bytes();

    let run = Pipeline::default()
        .run(&bytes, Some(TemplateKind::EquityAssetList))
        .unwrap();
    assert_eq!(run.detection.kind, TemplateKind::PortfolioMaster);
    assert_eq!(run.kind, TemplateKind::EquityAssetList);
    assert!(run.overridden());
    assert_eq!(run.outcome.sheet(), "EquityAssetList");
    assert!(run.outcome.is_completed());
}

#[test]
fn test_missing_sheet_is_fatal() {
    let bytes = Fixture::new()
        .meta("EquityAssetList v1")
        .sheet("Sheet1", &["A"], &[vec![N(1.0)]])
        .bytes();

    let err = Pipeline::default().run(&bytes, None).unwrap_err();
    match err {
        PipelineError::Workbook(WorkbookError::MissingSheet { expected, available }) => {
            assert_eq!(expected, "EquityAssetList");
            assert_eq!(available, vec!["Meta", "Sheet1"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_not_a_spreadsheet_is_fatal() {
    let err = Pipeline::default().run(b"not a workbook", None).unwrap_err();
    assert!(matches!(err, PipelineError::Workbook(WorkbookError::Read { .. })));
}

#[test]
fn test_legacy_pastor_sheet() {
    let bytes = Fixture::new()
        .sheet(
            "Pastor",
            PM_HEADERS,
            &[vec![S("Cash"), S("Money Market"), S("CHF"), N(250.0)]],
        )
        .bytes();

    let run = Pipeline::default().run(&bytes, None).unwrap();
    assert_eq!(run.kind, TemplateKind::PortfolioMaster);
    assert_eq!(run.outcome.sheet(), "Pastor");
    assert!(run.outcome.is_completed());
}

#[test]
fn test_run_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pm.xlsx");
    std::fs::write(&path, portfolio_master().bytes()).unwrap();

    let run = Pipeline::default().run_path(&path, None).unwrap();
    assert!(run.outcome.is_completed());
}
