//! PortfolioMaster: multi-asset allocations in USD.

use super::{empty_like, weights_for, AggregationEngine, AuxiliaryTables};
use crate::analytics::policy::{
    empty_policy, empty_policy_compare, ASSET_CLASS, CARBON_BENCHMARK_KEY, ESG_BENCHMARK_KEY,
};
use crate::analytics::{
    group_sum, group_table, maybe_parallel_map, numeric_column, or_zero, policy_compare,
    text_column, top_n, top_n_sum, weighted_average,
};
use crate::bundle::{Metrics, ResultBundle};
use crate::types::AnalyticsConfig;
use healthcheck_core::{Table, TemplateKind, Value};
use tracing::info;

const USD_TOTAL: &str = "USD Total";

/// Group tables: output key and candidate key columns.
const GROUPS: &[(&str, &[&str])] = &[
    ("by_asset_class", &[ASSET_CLASS]),
    ("by_sub_asset", &["Sub Asset Class"]),
    ("by_fx", &["FX"]),
    ("by_liquidity", &["Liquidity", "Liquid/Illiquid"]),
    ("by_country", &["Country ISO3", "Country"]),
];

/// Engine for [`TemplateKind::PortfolioMaster`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PortfolioMasterEngine;

impl AggregationEngine for PortfolioMasterEngine {
    fn kind(&self) -> TemplateKind {
        TemplateKind::PortfolioMaster
    }

    fn transform(
        &self,
        table: &Table,
        auxiliary: &AuxiliaryTables,
        config: &AnalyticsConfig,
    ) -> ResultBundle {
        let rows = table.len();
        let usd = numeric_column(table, &[USD_TOTAL]);
        let usd_values = usd.as_deref().map_or_else(|| vec![0.0; rows], or_zero);
        let weights = weights_for(table, usd.as_deref(), config);
        let w = &weights.weights;

        let metrics = Metrics::new()
            .count("n_rows", rows)
            .value("usd_total_sum", usd_values.iter().sum())
            .value("w_sum", weights.total())
            .value("top10_concentration_%", top_n_sum(w, config.top_concentration));

        let groups = maybe_parallel_map(GROUPS, config.should_parallelize(rows), |(key, by)| {
            (*key, group_table(table, by, USD_TOTAL, &usd_values))
        });

        let (policy, comparison) = match &auxiliary.policy {
            Some(targets) => {
                let actual = text_column(table, &[ASSET_CLASS])
                    .map(|classes| group_sum(&classes, &usd_values))
                    .unwrap_or_default();
                (targets.to_table(), policy_compare(&actual, targets))
            }
            None => (empty_policy(), empty_policy_compare()),
        };

        let fees_returns = {
            let exp = numeric_column(table, &["Exp Return % (annual)"]).unwrap_or_default();
            let ter = numeric_column(table, &["TER %"]).unwrap_or_default();
            let gross = weighted_average(&exp, w);
            let ter_w = weighted_average(&ter, w);
            metric_table([
                ("Gross Exp Return %", Some(gross)),
                ("TER % (weighted)", Some(ter_w)),
                ("Net Exp Return %", Some(gross - ter_w)),
            ])
        };

        let esg = {
            let score = numeric_column(table, &["ESG Score"]).unwrap_or_default();
            let carbon = numeric_column(table, &["Carbon Intensity"]).unwrap_or_default();
            let meta = &auxiliary.policy_meta;
            metric_table([
                ("Portfolio ESG", Some(weighted_average(&score, w))),
                ("Benchmark ESG", meta.number(ESG_BENCHMARK_KEY)),
                ("Portfolio Carbon", Some(weighted_average(&carbon, w))),
                ("Benchmark Carbon", meta.number(CARBON_BENCHMARK_KEY)),
            ])
        };

        let top_assets = match &usd {
            Some(values) => top_n(table, values, config.top_assets),
            None => empty_like(table),
        };

        let bundle = ResultBundle::builder(TemplateKind::PortfolioMaster)
            .metrics(metrics)
            .tables(groups)
            .table("policy", policy)
            .table("policy_compare", comparison)
            .table("fees_returns", fees_returns)
            .table("esg", esg)
            .table("top_assets", top_assets)
            .build();

        info!(rows, outputs = bundle.len(), "portfolio master transformed");
        bundle
    }
}

/// `[Metric, Value]` table; `None` renders as an empty cell.
fn metric_table<const N: usize>(rows: [(&str, Option<f64>); N]) -> Table {
    Table::with_rows(
        ["Metric", "Value"],
        rows.into_iter()
            .map(|(name, value)| vec![Value::from(name), Value::from(value)])
            .collect(),
    )
}
