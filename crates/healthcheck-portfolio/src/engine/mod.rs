//! Template-specific aggregation engines.
//!
//! One [`AggregationEngine`] implementation per [`TemplateKind`], selected
//! with [`engine_for`]. Engines never fail: outputs whose source columns are
//! absent come back as empty tables with the contracted headers.

mod equity;
mod fixed_income;
mod portfolio_master;

pub use equity::EquityEngine;
pub use fixed_income::FixedIncomeEngine;
pub use portfolio_master::PortfolioMasterEngine;

use crate::analytics::{
    numeric_column, resolve_weights, PolicyMeta, PolicyTargets, ResolvedWeights, WeightSource,
};
use crate::bundle::ResultBundle;
use crate::types::AnalyticsConfig;
use healthcheck_core::{Table, TemplateKind, Workbook};
use tracing::{debug, warn};

/// Header of the explicit weight column.
pub const WEIGHT: &str = "Weight %";
/// Headers tried, in order, for the position market value.
pub const MARKET_VALUE: &[&str] = &["Market Value (USD)", "USD Total"];
/// Name of the optional policy targets sheet.
pub const POLICY_SHEET: &str = "Policy";
/// Name of the optional benchmark metadata sheet.
pub const POLICY_META_SHEET: &str = "PolicyMeta";

/// Optional side inputs read from other sheets of the workbook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxiliaryTables {
    /// Policy targets, if a usable `Policy` sheet exists.
    pub policy: Option<PolicyTargets>,
    /// Benchmark metadata from `PolicyMeta`.
    pub policy_meta: PolicyMeta,
}

impl AuxiliaryTables {
    /// No side inputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the `Policy` and `PolicyMeta` sheets when present.
    #[must_use]
    pub fn from_workbook(workbook: &Workbook) -> Self {
        let policy = workbook.get(POLICY_SHEET).and_then(PolicyTargets::from_table);
        let policy_meta = workbook
            .get(POLICY_META_SHEET)
            .map(PolicyMeta::from_table)
            .unwrap_or_default();
        debug!(
            policy = policy.as_ref().map_or(0, PolicyTargets::len),
            policy_meta = !policy_meta.is_empty(),
            "auxiliary tables"
        );
        Self {
            policy,
            policy_meta,
        }
    }

    /// Sets the policy targets.
    #[must_use]
    pub fn with_policy(mut self, policy: PolicyTargets) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the benchmark metadata.
    #[must_use]
    pub fn with_policy_meta(mut self, meta: PolicyMeta) -> Self {
        self.policy_meta = meta;
        self
    }
}

/// Computes the result bundle for one template kind.
pub trait AggregationEngine: Send + Sync {
    /// Kind this engine handles.
    fn kind(&self) -> TemplateKind;

    /// Derives every output table and metric from a validated table.
    fn transform(
        &self,
        table: &Table,
        auxiliary: &AuxiliaryTables,
        config: &AnalyticsConfig,
    ) -> ResultBundle;
}

/// Returns the engine for a kind.
#[must_use]
pub fn engine_for(kind: TemplateKind) -> &'static dyn AggregationEngine {
    match kind {
        TemplateKind::PortfolioMaster => &PortfolioMasterEngine,
        TemplateKind::EquityAssetList => &EquityEngine,
        TemplateKind::FixedIncomeAssetList => &FixedIncomeEngine,
    }
}

/// Dispatches to the engine for `kind`.
#[must_use]
pub fn transform(
    table: &Table,
    kind: TemplateKind,
    auxiliary: &AuxiliaryTables,
    config: &AnalyticsConfig,
) -> ResultBundle {
    engine_for(kind).transform(table, auxiliary, config)
}

/// Resolves weights against a value column and logs how.
fn weights_for(
    table: &Table,
    values: Option<&[Option<f64>]>,
    config: &AnalyticsConfig,
) -> ResolvedWeights {
    let explicit = numeric_column(table, &[WEIGHT]);
    let resolved = resolve_weights(
        explicit.as_deref(),
        values,
        table.len(),
        config.weight_tolerance,
    );
    match resolved.source {
        WeightSource::Recomputed => warn!(
            tolerance = config.weight_tolerance,
            "explicit weights do not sum to 100, recomputed from values"
        ),
        source => debug!(?source, total = resolved.total(), "weights resolved"),
    }
    resolved
}

/// Every input column, no rows.
fn empty_like(table: &Table) -> Table {
    Table::new(table.columns())
}
