//! Group sums, weighted averages and top-N selection.

use super::columns::find_column;
use healthcheck_core::{text_values, Table, Value};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Sums `values` per key, largest sum first.
///
/// Missing keys form their own group. The sort is stable, so groups with
/// equal sums keep first-appearance order.
#[must_use]
pub fn group_sum(keys: &[Option<String>], values: &[f64]) -> Vec<(Option<String>, f64)> {
    let mut index: HashMap<&Option<String>, usize> = HashMap::new();
    let mut groups: Vec<(Option<String>, f64)> = Vec::new();

    for (key, value) in keys.iter().zip(values) {
        match index.get(key) {
            Some(&i) => groups[i].1 += value,
            None => {
                index.insert(key, groups.len());
                groups.push((key.clone(), *value));
            }
        }
    }

    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    groups
}

/// Builds a two-column group table `[key header, value_header]`.
///
/// The key column is the first candidate present in `table`; its name is the
/// key header. Without any candidate the result is an empty table headed by
/// the first candidate.
#[must_use]
pub fn group_table(
    table: &Table,
    candidates: &[&'static str],
    value_header: &str,
    values: &[f64],
) -> Table {
    let Some((header, column)) = find_column(table, candidates) else {
        let header = candidates.first().copied().unwrap_or_default();
        return Table::new([header, value_header]);
    };

    let keys = text_values(&column);
    let rows = group_sum(&keys, values)
        .into_iter()
        .map(|(k, v)| vec![Value::from(k), Value::Number(v)])
        .collect();
    Table::with_rows([header, value_header], rows)
}

/// `Σ metric[i] * weight[i] / 100`; rows with a missing metric contribute zero.
#[must_use]
pub fn weighted_average(metric: &[Option<f64>], weights: &[f64]) -> f64 {
    metric
        .iter()
        .zip(weights)
        .filter_map(|(m, w)| m.map(|m| m * w / 100.0))
        .sum()
}

/// Indices of the `n` largest values, largest first.
///
/// Stable: equal values keep row order. Missing values sort last.
#[must_use]
pub fn top_n_indices(values: &[Option<f64>], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| match (values[a], values[b]) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    order.truncate(n);
    order
}

/// The `n` rows of `table` with the largest `values`, all columns kept.
#[must_use]
pub fn top_n(table: &Table, values: &[Option<f64>], n: usize) -> Table {
    table.select_rows(&top_n_indices(values, n))
}

/// Sum of the `n` largest weights.
#[must_use]
pub fn top_n_sum(weights: &[f64], n: usize) -> f64 {
    let mut sorted = weights.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    sorted.iter().take(n).sum()
}
