//! The result bundle: every derived table and metric of one run.
//!
//! A bundle is assembled once through [`ResultBundleBuilder`] and is
//! read-only afterwards. Entry order is insertion order, which is the order
//! consumers render them in.

use healthcheck_core::{Table, TemplateKind};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Key under which the headline metrics are stored.
pub const METRICS_KEY: &str = "metrics";

/// A single headline metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    /// Integer count.
    Count(usize),
    /// Real-valued amount.
    Value(f64),
}

impl Metric {
    /// Returns the metric as a float.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Count(n) => *n as f64,
            Self::Value(v) => *v,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Value(v) => write!(f, "{v:.2}"),
        }
    }
}

/// Ordered name → metric mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    entries: Vec<(String, Metric)>,
}

impl Metrics {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a count, builder style.
    #[must_use]
    pub fn count(mut self, name: impl Into<String>, n: usize) -> Self {
        self.insert(name, Metric::Count(n));
        self
    }

    /// Adds a value, builder style.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, v: f64) -> Self {
        self.insert(name, Metric::Value(v));
        self
    }

    /// Inserts or replaces a metric.
    pub fn insert(&mut self, name: impl Into<String>, metric: Metric) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = metric,
            None => self.entries.push((name, metric)),
        }
    }

    /// Looks up a metric.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Metric> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, m)| *m)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Metric)> {
        self.entries.iter().map(|(k, m)| (k.as_str(), *m))
    }

    /// Number of metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Metrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, m) in &self.entries {
            map.serialize_entry(k, m)?;
        }
        map.end()
    }
}

/// One bundle entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    /// A derived table.
    Table(Table),
    /// Headline metrics.
    Metrics(Metrics),
}

/// Immutable mapping of output key → derived table or metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBundle {
    kind: TemplateKind,
    entries: Vec<(String, Output)>,
}

impl ResultBundle {
    /// Starts a builder.
    #[must_use]
    pub fn builder(kind: TemplateKind) -> ResultBundleBuilder {
        ResultBundleBuilder::new(kind)
    }

    /// Kind the bundle was computed for.
    #[must_use]
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Looks up an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Output> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, o)| o)
    }

    /// Looks up a table entry.
    #[must_use]
    pub fn table(&self, key: &str) -> Option<&Table> {
        match self.get(key) {
            Some(Output::Table(t)) => Some(t),
            _ => None,
        }
    }

    /// The headline metrics. Empty if none were recorded.
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        static EMPTY: Metrics = Metrics {
            entries: Vec::new(),
        };
        match self.get(METRICS_KEY) {
            Some(Output::Metrics(m)) => m,
            _ => &EMPTY,
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Table entries in insertion order.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.entries.iter().filter_map(|(k, o)| match o {
            Output::Table(t) => Some((k.as_str(), t)),
            Output::Metrics(_) => None,
        })
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Output)> {
        self.entries.iter().map(|(k, o)| (k.as_str(), o))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bundle has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ResultBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, o) in &self.entries {
            map.serialize_entry(k, o)?;
        }
        map.end()
    }
}

/// Builder for [`ResultBundle`].
///
/// Adding an entry under an existing key replaces it in place.
#[derive(Debug, Clone)]
pub struct ResultBundleBuilder {
    kind: TemplateKind,
    entries: Vec<(String, Output)>,
}

impl ResultBundleBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Sets the headline metrics.
    #[must_use]
    pub fn metrics(self, metrics: Metrics) -> Self {
        self.entry(METRICS_KEY, Output::Metrics(metrics))
    }

    /// Adds a table.
    #[must_use]
    pub fn table(self, key: impl Into<String>, table: Table) -> Self {
        self.entry(key, Output::Table(table))
    }

    /// Adds several tables.
    #[must_use]
    pub fn tables<K: Into<String>>(self, tables: impl IntoIterator<Item = (K, Table)>) -> Self {
        tables
            .into_iter()
            .fold(self, |builder, (k, t)| builder.table(k, t))
    }

    fn entry(mut self, key: impl Into<String>, output: Output) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = output,
            None => self.entries.push((key, output)),
        }
        self
    }

    /// Finalizes the bundle.
    #[must_use]
    pub fn build(self) -> ResultBundle {
        ResultBundle {
            kind: self.kind,
            entries: self.entries,
        }
    }
}
