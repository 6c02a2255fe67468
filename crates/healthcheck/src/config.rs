//! Pipeline configuration.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! [analytics]
//! top_assets = 20
//! weight_tolerance = 0.25
//! as_of = "2025-01-01"
//!
//! [validation]
//! weight_sum_tolerance = 0.5
//! ```

use crate::error::{PipelineError, PipelineResult};
use healthcheck_portfolio::AnalyticsConfig;
use healthcheck_schema::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Aggregation engine settings.
    pub analytics: AnalyticsConfig,
    /// Validator settings.
    pub validation: ValidationConfig,
}

impl PipelineConfig {
    /// Creates the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the analytics config.
    #[must_use]
    pub fn with_analytics(mut self, analytics: AnalyticsConfig) -> Self {
        self.analytics = analytics;
        self
    }

    /// Sets the validation config.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// Parses and checks a TOML document.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or out-of-range values.
    pub fn from_toml_str(source: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or [`from_toml_str`](Self::from_toml_str) fails.
    pub fn from_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| PipelineError::config_file(path.display().to_string(), e.to_string()))?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns the first field that is out of range.
    pub fn validate(&self) -> PipelineResult<()> {
        let tolerances = [
            ("analytics.weight_tolerance", self.analytics.weight_tolerance),
            (
                "validation.weight_sum_tolerance",
                self.validation.weight_sum_tolerance,
            ),
        ];
        for (field, value) in tolerances {
            if !value.is_finite() || value < 0.0 {
                return Err(PipelineError::config(
                    field,
                    format!("must be a non-negative number, got {value}"),
                ));
            }
        }

        let sizes = [
            ("analytics.top_concentration", self.analytics.top_concentration),
            ("analytics.top_assets", self.analytics.top_assets),
            ("analytics.top_positions", self.analytics.top_positions),
        ];
        for (field, value) in sizes {
            if value == 0 {
                return Err(PipelineError::config(field, "must be at least 1"));
            }
        }
        Ok(())
    }
}
