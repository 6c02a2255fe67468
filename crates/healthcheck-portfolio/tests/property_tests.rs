//! Property-based tests for aggregation invariants.
//!
//! - Resolved weights sum to 100 when weights and values are consistent
//! - Group totals conserve the value total
//! - Bucketing partitions rows with a present metric
//! - Top-N returns at most N rows in stable descending order

use healthcheck_core::{Table, TemplateKind, Value};
use healthcheck_portfolio::analytics::{group_sum, resolve_weights, top_n_indices, WeightSource};
use healthcheck_portfolio::bucketize;
use healthcheck_portfolio::prelude::*;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn classes() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Equity".to_string())),
        Just(Some("Bond".to_string())),
        Just(Some("Cash".to_string())),
        Just(Some("Alternatives".to_string())),
    ]
}

fn positions() -> impl Strategy<Value = Vec<(Option<String>, f64)>> {
    prop::collection::vec((classes(), 1.0f64..1_000_000.0), 1..60)
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_consistent_weights_sum_to_100(values in prop::collection::vec(1.0f64..1e7, 1..80)) {
        let total: f64 = values.iter().sum();
        let explicit: Vec<Option<f64>> = values.iter().map(|v| Some(v / total * 100.0)).collect();
        let values: Vec<Option<f64>> = values.into_iter().map(Some).collect();

        let resolved = resolve_weights(Some(&explicit[..]), Some(&values[..]), values.len(), 0.25);
        prop_assert!((resolved.total() - 100.0).abs() <= 0.25);
        prop_assert_eq!(resolved.source, WeightSource::Explicit);
    }

    #[test]
    fn prop_derived_weights_sum_to_100(values in prop::collection::vec(0.0f64..1e7, 1..80)) {
        prop_assume!(values.iter().sum::<f64>() > 0.0);
        let values: Vec<Option<f64>> = values.into_iter().map(Some).collect();
        let resolved = resolve_weights(None, Some(&values[..]), values.len(), 0.25);
        prop_assert!((resolved.total() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn prop_group_sum_conserves_total(rows in positions()) {
        let (keys, values): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        let groups = group_sum(&keys, &values);

        let input: f64 = values.iter().sum();
        let output: f64 = groups.iter().map(|(_, v)| v).sum();
        prop_assert!((input - output).abs() <= 1e-6 * input.max(1.0));

        // One group per distinct key, largest first.
        let mut distinct = keys.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(groups.len(), distinct.len());
        prop_assert!(groups.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn prop_bucketing_partitions_present_rows(
        rows in prop::collection::vec((prop::option::of(-2.0f64..40.0), 0.0f64..100.0), 0..60)
    ) {
        let (metric, weights): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        let buckets = bucketize(&metric, &weights);

        prop_assert_eq!(buckets.len(), TenorBucket::all().len());
        let bucketed: f64 = buckets.iter().map(|(_, w)| w).sum();
        let present: f64 = metric
            .iter()
            .zip(&weights)
            .filter(|(m, _)| m.is_some())
            .map(|(_, w)| w)
            .sum();
        prop_assert!((bucketed - present).abs() < 1e-6);
    }

    #[test]
    fn prop_top_n_is_stable_descending(
        values in prop::collection::vec(prop::option::of(0.0f64..100.0), 0..50),
        n in 0usize..30,
    ) {
        let top = top_n_indices(&values, n);
        prop_assert!(top.len() <= n);
        prop_assert_eq!(top.len(), n.min(values.len()));

        for pair in top.windows(2) {
            let (a, b) = (values[pair[0]], values[pair[1]]);
            match (a, b) {
                (Some(x), Some(y)) => {
                    prop_assert!(x >= y);
                    if x == y {
                        prop_assert!(pair[0] < pair[1]);
                    }
                }
                (None, Some(_)) => prop_assert!(false, "missing value ranked above present"),
                (Some(_), None) => {}
                (None, None) => prop_assert!(pair[0] < pair[1]),
            }
        }
    }

    #[test]
    fn prop_portfolio_master_groups_conserve_usd(rows in positions()) {
        let total: f64 = rows.iter().map(|(_, v)| v).sum();
        let table = Table::with_rows(
            ["Asset Class", "USD Total"],
            rows.into_iter()
                .map(|(class, usd)| vec![Value::from(class), Value::from(usd)])
                .collect(),
        );

        let bundle = transform(
            &table,
            TemplateKind::PortfolioMaster,
            &AuxiliaryTables::new(),
            &AnalyticsConfig::default(),
        );
        let by_ac = bundle.table("by_asset_class").unwrap();
        let grouped: f64 = by_ac
            .column("USD Total")
            .unwrap()
            .values()
            .filter_map(Value::as_f64)
            .sum();
        prop_assert!((grouped - total).abs() <= 1e-6 * total.max(1.0));
        prop_assert!((bundle.metrics().get("w_sum").unwrap().as_f64() - 100.0).abs() < 1e-6);
    }
}
