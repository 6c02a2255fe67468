//! EquityAssetList: single-stock and fund positions.

use super::{empty_like, weights_for, AggregationEngine, AuxiliaryTables, MARKET_VALUE, WEIGHT};
use crate::analytics::{group_table, maybe_parallel_map, numeric_column, or_zero, top_n};
use crate::bundle::{Metrics, ResultBundle};
use crate::types::AnalyticsConfig;
use healthcheck_core::{Table, TemplateKind};
use tracing::info;

const GROUPS: &[(&str, &[&str])] = &[
    ("by_sector", &["Sector (GICS)"]),
    ("by_region", &["Region"]),
];

/// Engine for [`TemplateKind::EquityAssetList`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EquityEngine;

impl AggregationEngine for EquityEngine {
    fn kind(&self) -> TemplateKind {
        TemplateKind::EquityAssetList
    }

    fn transform(
        &self,
        table: &Table,
        _auxiliary: &AuxiliaryTables,
        config: &AnalyticsConfig,
    ) -> ResultBundle {
        let rows = table.len();
        let market_value = numeric_column(table, MARKET_VALUE);
        let mv_sum: f64 = market_value.as_deref().map(or_zero).unwrap_or_default().iter().sum();
        let weights = weights_for(table, market_value.as_deref(), config);

        let metrics = Metrics::new()
            .count("n_rows", rows)
            .value("mv_sum", mv_sum)
            .value("w_sum", weights.total());

        let groups = maybe_parallel_map(GROUPS, config.should_parallelize(rows), |(key, by)| {
            (*key, group_table(table, by, WEIGHT, &weights.weights))
        });

        let top_positions = match &market_value {
            Some(values) => top_n(table, values, config.top_positions),
            None => empty_like(table),
        };

        let bundle = ResultBundle::builder(TemplateKind::EquityAssetList)
            .metrics(metrics)
            .tables(groups)
            .table("top_positions", top_positions)
            .build();

        info!(rows, outputs = bundle.len(), "equity list transformed");
        bundle
    }
}
