//! # Health Check Portfolio
//!
//! Aggregation engines for validated portfolio templates.
//!
//! Each [`TemplateKind`](healthcheck_core::TemplateKind) has an
//! [`AggregationEngine`] that turns the resolved position table into a
//! [`ResultBundle`]: a `metrics` summary plus named tables with fixed keys
//! and headers.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: engines take the table, optional side inputs and a
//!   config; no I/O
//! - **Never fail**: an output whose source column is absent becomes an
//!   empty table with the contracted headers
//! - **Config-driven parallelism**: optional rayon support with
//!   threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use healthcheck_core::{Table, TemplateKind, Value};
//! use healthcheck_portfolio::prelude::*;
//!
//! let table = Table::with_rows(
//!     ["Asset Class", "USD Total"],
//!     vec![
//!         vec![Value::from("Equity"), Value::from(600.0)],
//!         vec![Value::from("Bond"), Value::from(400.0)],
//!     ],
//! );
//!
//! let bundle = transform(
//!     &table,
//!     TemplateKind::PortfolioMaster,
//!     &AuxiliaryTables::new(),
//!     &AnalyticsConfig::default(),
//! );
//! assert_eq!(bundle.metrics().get("usd_total_sum").map(|m| m.as_f64()), Some(1000.0));
//! assert_eq!(bundle.table("by_asset_class").map(|t| t.len()), Some(2));
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Weights, group sums, top-N and policy comparison
//! - [`bucketing`] - Maturity and duration tenor buckets
//! - [`bundle`] - The result bundle and its metrics
//! - [`engine`] - One engine per template kind
//! - [`types`] - Config and bucket types
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based evaluation of independent group tables

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod bucketing;
pub mod bundle;
pub mod engine;
pub mod types;

pub use types::{AnalyticsConfig, TenorBucket};

pub use bundle::{Metric, Metrics, Output, ResultBundle, ResultBundleBuilder, METRICS_KEY};

pub use engine::{
    engine_for, transform, AggregationEngine, AuxiliaryTables, EquityEngine, FixedIncomeEngine,
    PortfolioMasterEngine,
};

pub use analytics::{
    group_sum, group_table, maybe_parallel_map, resolve_weights, PolicyMeta, PolicyTargets,
    ResolvedWeights, WeightSource,
};

pub use bucketing::{bucket_table, bucketize};

/// Prelude module for convenient imports.
///
/// ```rust
/// use healthcheck_portfolio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analytics::{PolicyMeta, PolicyTargets};
    pub use crate::bundle::{Metric, Metrics, Output, ResultBundle};
    pub use crate::engine::{engine_for, transform, AggregationEngine, AuxiliaryTables};
    pub use crate::types::{AnalyticsConfig, TenorBucket};
}
