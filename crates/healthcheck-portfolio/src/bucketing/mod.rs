//! Tenor bucketing.
//!
//! Partitions rows with a present metric into [`TenorBucket`]s and sums
//! their weights. Rows without the metric are left out.

use crate::types::TenorBucket;
use healthcheck_core::{Table, Value};

/// Header of the bucket label column.
pub const BUCKET_HEADER: &str = "Bucket";

/// Weight per bucket, every bucket listed in order.
#[must_use]
pub fn bucketize(metric: &[Option<f64>], weights: &[f64]) -> Vec<(TenorBucket, f64)> {
    let mut totals: Vec<(TenorBucket, f64)> =
        TenorBucket::all().iter().map(|&b| (b, 0.0)).collect();

    for (m, w) in metric.iter().zip(weights) {
        if let Some(bucket) = m.and_then(TenorBucket::from_years) {
            // `all()` is in declaration order, so the discriminant is the slot.
            totals[bucket as usize].1 += w;
        }
    }
    totals
}

/// Renders bucket weights as a `[Bucket, weight_header]` table.
#[must_use]
pub fn bucket_table(
    metric: &[Option<f64>],
    weights: &[f64],
    weight_header: &str,
    label: fn(&TenorBucket) -> &'static str,
) -> Table {
    let rows = bucketize(metric, weights)
        .into_iter()
        .map(|(b, w)| vec![Value::from(label(&b)), Value::Number(w)])
        .collect();
    Table::with_rows([BUCKET_HEADER, weight_header], rows)
}

/// An empty `[Bucket, weight_header]` table.
#[must_use]
pub fn empty_bucket_table(weight_header: &str) -> Table {
    Table::new([BUCKET_HEADER, weight_header])
}
