//! Declared schemas for the three template kinds.
//!
//! Each schema is built once on first use and shared by every validation of
//! its kind.

use crate::column::ColumnSpec;
use healthcheck_core::TemplateKind;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Ordered column declarations for one template kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    /// Kind this schema validates.
    pub kind: TemplateKind,
    /// Columns in declaration order.
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Returns the schema for a kind.
    #[must_use]
    pub fn for_kind(kind: TemplateKind) -> &'static Schema {
        match kind {
            TemplateKind::PortfolioMaster => &PORTFOLIO_MASTER,
            TemplateKind::EquityAssetList => &EQUITY_ASSET_LIST,
            TemplateKind::FixedIncomeAssetList => &FIXED_INCOME_ASSET_LIST,
        }
    }

    /// Looks up a declared column by canonical name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Declared columns marked required.
    pub fn required(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.required)
    }
}

static PORTFOLIO_MASTER: Lazy<Schema> = Lazy::new(|| Schema {
    kind: TemplateKind::PortfolioMaster,
    columns: vec![
        ColumnSpec::text("Category").not_null(),
        ColumnSpec::text("Account").not_null(),
        ColumnSpec::text("Asset Class").required().not_null(),
        ColumnSpec::text("Sub Asset Class").required().not_null(),
        ColumnSpec::text("Liquidity").with_alias("Liquid/Illiquid"),
        ColumnSpec::text("Exposure"),
        ColumnSpec::text("FX").required(),
        ColumnSpec::text("Manager"),
        ColumnSpec::text("Asset"),
        ColumnSpec::number("USD Total").required().non_negative(),
        ColumnSpec::text("ISIN"),
        ColumnSpec::number("%"),
        ColumnSpec::text("BBG"),
        ColumnSpec::number("Number"),
        ColumnSpec::text("Region"),
        ColumnSpec::text("Country"),
        ColumnSpec::text("Country ISO3"),
        ColumnSpec::number("Weight %").non_negative(),
        ColumnSpec::text("Vehicle Type"),
        ColumnSpec::number("TER %"),
        ColumnSpec::number("Exp Return % (annual)"),
        ColumnSpec::number("Perf YTD %"),
        ColumnSpec::number("Perf 1Y %"),
        ColumnSpec::number("Perf 3Y % (ann)"),
        ColumnSpec::number("Volatility %"),
        ColumnSpec::number("Max Drawdown %"),
        ColumnSpec::number("Gross Exposure %"),
        ColumnSpec::number("Net Exposure %"),
        ColumnSpec::text("Benchmark"),
        ColumnSpec::number("ESG Score"),
        ColumnSpec::number("Carbon Intensity"),
    ],
});

static EQUITY_ASSET_LIST: Lazy<Schema> = Lazy::new(|| Schema {
    kind: TemplateKind::EquityAssetList,
    columns: vec![
        ColumnSpec::text("Category"),
        ColumnSpec::text("Account"),
        ColumnSpec::text("Asset Class"),
        ColumnSpec::text("Sub Asset Class"),
        ColumnSpec::text("Region"),
        ColumnSpec::text("Country"),
        ColumnSpec::text("Sector (GICS)"),
        ColumnSpec::text("Liquid/Illiquid").with_alias("Liquidity"),
        ColumnSpec::text("FX"),
        ColumnSpec::text("Manager"),
        ColumnSpec::text("Asset (Security Name)").required(),
        ColumnSpec::text("Ticker"),
        ColumnSpec::text("ISIN"),
        ColumnSpec::text("SEDOL"),
        ColumnSpec::text("BBG Ticker"),
        ColumnSpec::number("Shares"),
        ColumnSpec::number("Price (Local)"),
        ColumnSpec::date("Price Date"),
        ColumnSpec::number("Market Value (USD)").required().non_negative(),
        ColumnSpec::number("Weight %").non_negative(),
        ColumnSpec::text("Benchmark"),
        ColumnSpec::number("Active Weight %"),
        ColumnSpec::text("Notes"),
    ],
});

static FIXED_INCOME_ASSET_LIST: Lazy<Schema> = Lazy::new(|| Schema {
    kind: TemplateKind::FixedIncomeAssetList,
    columns: vec![
        ColumnSpec::text("Category"),
        ColumnSpec::text("Account"),
        ColumnSpec::text("Asset Class"),
        ColumnSpec::text("Sub Asset Class"),
        ColumnSpec::text("Region"),
        ColumnSpec::text("Country"),
        ColumnSpec::text("Liquid/Illiquid").with_alias("Liquidity"),
        ColumnSpec::text("FX"),
        ColumnSpec::text("Manager"),
        ColumnSpec::text("Asset (Bond Name)"),
        ColumnSpec::text("Ticker"),
        ColumnSpec::text("ISIN"),
        ColumnSpec::text("BBG Ticker"),
        ColumnSpec::number("Coupon %"),
        ColumnSpec::text("Coupon Type (Fixed/Floating/Zero)"),
        ColumnSpec::text("Frequency (Annual/Semi/Quarterly)"),
        ColumnSpec::date("Issue Date"),
        ColumnSpec::date("Maturity Date"),
        ColumnSpec::date("Next Call Date"),
        ColumnSpec::text("Callable (Y/N)"),
        ColumnSpec::text("Puttable (Y/N)"),
        ColumnSpec::number("Clean Price"),
        ColumnSpec::number("Dirty Price"),
        ColumnSpec::number("Accrued Interest"),
        ColumnSpec::number("Face Value"),
        ColumnSpec::number("Market Value (USD)").non_negative(),
        ColumnSpec::number("Yield to Maturity %"),
        ColumnSpec::number("Years to Maturity").with_alias("Maturity (Years)"),
        ColumnSpec::number("Modified Duration")
            .with_alias("Mod Duration")
            .with_alias("Duration"),
        ColumnSpec::number("Convexity"),
        ColumnSpec::number("OAS (bps)"),
        ColumnSpec::text("Rating")
            .required()
            .with_alias("Rating (S&P/Moody's/Fitch)"),
        ColumnSpec::text("Seniority/Type"),
        ColumnSpec::text("Security Type (Gov/Corp/EM/HY/ABS/MBS)"),
        ColumnSpec::text("Notes"),
        ColumnSpec::number("Weight %").non_negative(),
    ],
});
