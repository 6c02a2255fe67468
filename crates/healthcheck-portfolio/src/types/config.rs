//! Analytics configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Configuration for the aggregation engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Enable parallel evaluation of independent group tables
    /// (requires the `parallel` feature).
    pub parallel: bool,

    /// Minimum row count to trigger parallel evaluation.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Number of largest weights summed for the concentration metric.
    pub top_concentration: usize,

    /// Rows kept in `top_assets`.
    pub top_assets: usize,

    /// Rows kept in `top_positions`.
    pub top_positions: usize,

    /// Explicit weights further than this from 100 are recomputed from the
    /// value column.
    pub weight_tolerance: f64,

    /// Valuation date used to derive years to maturity from `Maturity Date`
    /// when no maturity-in-years column exists.
    pub as_of: Option<NaiveDate>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 1_000,
            top_concentration: 10,
            top_assets: 15,
            top_positions: 25,
            weight_tolerance: 0.25,
            as_of: None,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always evaluates sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel evaluation.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the row threshold for parallel evaluation.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the concentration depth.
    #[must_use]
    pub fn with_top_concentration(mut self, n: usize) -> Self {
        self.top_concentration = n;
        self
    }

    /// Sets the `top_assets` size.
    #[must_use]
    pub fn with_top_assets(mut self, n: usize) -> Self {
        self.top_assets = n;
        self
    }

    /// Sets the `top_positions` size.
    #[must_use]
    pub fn with_top_positions(mut self, n: usize) -> Self {
        self.top_positions = n;
        self
    }

    /// Sets the weight recomputation tolerance.
    #[must_use]
    pub fn with_weight_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_tolerance = tolerance;
        self
    }

    /// Sets the valuation date.
    #[must_use]
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Returns true if parallel evaluation should be used for the given row count.
    #[must_use]
    pub fn should_parallelize(&self, rows: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && rows >= self.parallel_threshold
    }
}
