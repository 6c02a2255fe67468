//! FixedIncomeAssetList: bond positions with duration and maturity.

use super::{weights_for, AggregationEngine, AuxiliaryTables, MARKET_VALUE, WEIGHT};
use crate::analytics::{group_table, maybe_parallel_map, numeric_column, or_zero, weighted_average};
use crate::bucketing::{bucket_table, empty_bucket_table};
use crate::bundle::{Metrics, ResultBundle};
use crate::types::{AnalyticsConfig, TenorBucket};
use chrono::NaiveDate;
use healthcheck_core::{date_values, Table, TemplateKind};
use tracing::{debug, info};

const RATING: &[&str] = &["Rating", "Rating (S&P/Moody's/Fitch)"];
const DURATION: &[&str] = &["Modified Duration", "Mod Duration", "Duration"];
const YEARS_TO_MATURITY: &[&str] = &["Years to Maturity", "Maturity (Years)"];
const MATURITY_DATE: &str = "Maturity Date";

const DAYS_PER_YEAR: f64 = 365.25;

type Label = fn(&TenorBucket) -> &'static str;

/// Engine for [`TemplateKind::FixedIncomeAssetList`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIncomeEngine;

impl AggregationEngine for FixedIncomeEngine {
    fn kind(&self) -> TemplateKind {
        TemplateKind::FixedIncomeAssetList
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
        let w = &weights.weights;

        let duration = numeric_column(table, DURATION);
        let maturity = years_to_maturity(table, config.as_of);

        let metrics = Metrics::new()
            .count("n_rows", rows)
            .value("mv_sum", mv_sum)
            .value("w_sum", weights.total())
            .value(
                "dur_wt_avg",
                duration.as_deref().map_or(0.0, |d| weighted_average(d, w)),
            );

        let by_rating = group_table(table, RATING, WEIGHT, w);

        let sources: [(&str, Option<Vec<Option<f64>>>, Label); 2] = [
            ("maturity_buckets", maturity, TenorBucket::maturity_label),
            ("duration_buckets", duration, TenorBucket::duration_label),
        ];
        let parallel = config.should_parallelize(rows);
        let buckets = maybe_parallel_map(&sources, parallel, |(key, metric, label)| {
            let table = match metric {
                Some(metric) => bucket_table(metric, w, WEIGHT, *label),
                None => empty_bucket_table(WEIGHT),
            };
            (*key, table)
        });

        let bundle = ResultBundle::builder(TemplateKind::FixedIncomeAssetList)
            .metrics(metrics)
            .table("by_rating", by_rating)
            .tables(buckets)
            .build();

        info!(rows, outputs = bundle.len(), "fixed income list transformed");
        bundle
    }
}

/// Years to maturity per row.
///
/// Read from an explicit years column, or derived from `Maturity Date` when
/// a valuation date is configured.
fn years_to_maturity(table: &Table, as_of: Option<NaiveDate>) -> Option<Vec<Option<f64>>> {
    if let Some(years) = numeric_column(table, YEARS_TO_MATURITY) {
        return Some(years);
    }
    let as_of = as_of?;
    let dates = date_values(&table.column(MATURITY_DATE)?);
    debug!(%as_of, "deriving years to maturity from maturity dates");
    Some(
        dates
            .into_iter()
            .map(|d| d.map(|d| (d - as_of).num_days() as f64 / DAYS_PER_YEAR))
            .collect(),
    )
}
