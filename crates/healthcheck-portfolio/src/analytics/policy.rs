//! Policy targets and benchmark metadata.

use healthcheck_core::{coerce_value, numeric_values, text_values, SemanticType, Table, Value};
use std::collections::BTreeMap;

/// Header of the asset class column in the `Policy` sheet and outputs.
pub const ASSET_CLASS: &str = "Asset Class";
/// Header of the target weight column.
pub const POLICY_WEIGHT: &str = "Policy Weight %";
/// Header of the actual weight column in the comparison.
pub const ACTUAL_PCT: &str = "Actual %";

/// Benchmark ESG score key in `PolicyMeta`.
pub const ESG_BENCHMARK_KEY: &str = "ESG_Benchmark_Score";
/// Benchmark carbon intensity key in `PolicyMeta`.
pub const CARBON_BENCHMARK_KEY: &str = "Carbon_Benchmark_Intensity";

/// Target weight per asset class, ordered by asset class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyTargets {
    targets: BTreeMap<String, f64>,
}

impl PolicyTargets {
    /// Reads targets from a `Policy` sheet.
    ///
    /// Requires both `Asset Class` and `Policy Weight %`; duplicates are
    /// summed, blank asset classes skipped and unparseable weights count as
    /// zero. Returns `None` when either column is missing.
    #[must_use]
    pub fn from_table(table: &Table) -> Option<Self> {
        let classes = text_values(&table.column(ASSET_CLASS)?);
        let weights = numeric_values(&table.column(POLICY_WEIGHT)?);

        let mut targets = BTreeMap::new();
        for (class, weight) in classes.into_iter().zip(weights) {
            if let Some(class) = class {
                *targets.entry(class).or_insert(0.0) += weight.unwrap_or(0.0);
            }
        }
        Some(Self { targets })
    }

    /// Builds targets from pairs, summing duplicates.
    #[must_use]
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        let mut targets = BTreeMap::new();
        for (class, weight) in pairs {
            *targets.entry(class.into()).or_insert(0.0) += weight;
        }
        Self { targets }
    }

    /// Target for an asset class.
    #[must_use]
    pub fn get(&self, class: &str) -> Option<f64> {
        self.targets.get(class).copied()
    }

    /// Number of asset classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if there are no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// `[Asset Class, Policy Weight %]` table.
    #[must_use]
    pub fn to_table(&self) -> Table {
        Table::with_rows(
            [ASSET_CLASS, POLICY_WEIGHT],
            self.targets
                .iter()
                .map(|(k, v)| vec![Value::from(k.as_str()), Value::Number(*v)])
                .collect(),
        )
    }
}

/// Key/value benchmark metadata from the `PolicyMeta` sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyMeta {
    entries: BTreeMap<String, Value>,
}

impl PolicyMeta {
    /// Reads the first two columns of each data row as key and value.
    /// Sheets with fewer than two columns yield empty metadata.
    #[must_use]
    pub fn from_table(table: &Table) -> Self {
        if table.width() < 2 {
            return Self::default();
        }
        let entries = table
            .rows()
            .filter_map(|row| {
                let key = row[0].to_string().trim().to_string();
                (!key.is_empty()).then(|| (key, row[1].clone()))
            })
            .collect();
        Self { entries }
    }

    /// Adds an entry, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Numeric value for a key, if present and parseable.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        let value = self.entries.get(key)?;
        coerce_value(value, SemanticType::Number).and_then(|c| c.as_f64())
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outer join of actual asset-class totals against targets.
///
/// `actual` holds per-class totals (e.g. the `by_asset_class` groups); they
/// are converted to percentages of their sum. Classes on one side only get
/// zero on the other. Rows are ordered by asset class, blank class first.
#[must_use]
pub fn policy_compare(actual: &[(Option<String>, f64)], targets: &PolicyTargets) -> Table {
    let total: f64 = actual.iter().map(|(_, v)| v).sum();
    let mut joined: BTreeMap<Option<String>, (f64, f64)> = BTreeMap::new();

    for (class, value) in actual {
        let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        joined.entry(class.clone()).or_insert((0.0, 0.0)).0 += pct;
    }
    for (class, weight) in &targets.targets {
        joined.entry(Some(class.clone())).or_insert((0.0, 0.0)).1 += weight;
    }

    let rows = joined
        .into_iter()
        .map(|(class, (a, p))| vec![Value::from(class), Value::Number(a), Value::Number(p)])
        .collect();
    Table::with_rows([ASSET_CLASS, ACTUAL_PCT, POLICY_WEIGHT], rows)
}

/// `[Asset Class, Actual %, Policy Weight %]` with no rows.
#[must_use]
pub fn empty_policy_compare() -> Table {
    Table::new([ASSET_CLASS, ACTUAL_PCT, POLICY_WEIGHT])
}

/// `[Asset Class, Policy Weight %]` with no rows.
#[must_use]
pub fn empty_policy() -> Table {
    Table::new([ASSET_CLASS, POLICY_WEIGHT])
}
