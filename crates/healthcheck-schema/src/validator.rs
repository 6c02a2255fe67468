//! Structural validation and business rules.

use crate::column::ColumnSpec;
use crate::schemas::Schema;
use healthcheck_core::{coerce_value, Coerced, Table, TemplateKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// One validation failure.
///
/// `column` is `None` for table-level failures; `index` is `None` for
/// failures that are not tied to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Column the failure belongs to.
    pub column: Option<String>,
    /// Zero-based data row index.
    pub index: Option<usize>,
    /// Human-readable description.
    pub failure: String,
}

impl ValidationError {
    /// Table-level failure.
    #[must_use]
    pub fn table(failure: impl Into<String>) -> Self {
        Self {
            column: None,
            index: None,
            failure: failure.into(),
        }
    }

    /// Column-level failure.
    #[must_use]
    pub fn column(column: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            index: None,
            failure: failure.into(),
        }
    }

    /// Cell-level failure.
    #[must_use]
    pub fn cell(column: impl Into<String>, index: usize, failure: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            index: Some(index),
            failure: failure.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.column, self.index) {
            (Some(c), Some(i)) => write!(f, "{c} [row {i}]: {}", self.failure),
            (Some(c), None) => write!(f, "{c}: {}", self.failure),
            (None, _) => write!(f, "{}", self.failure),
        }
    }
}

/// Validator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Allowed distance of the `Weight %` total from 100.
    pub weight_sum_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            weight_sum_tolerance: 0.5,
        }
    }
}

impl ValidationConfig {
    /// Sets the weight total tolerance.
    #[must_use]
    pub fn with_weight_sum_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_sum_tolerance = tolerance;
        self
    }
}

/// Validates tables against the declared schema of their kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Creates a validator.
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Runs the structural checks then the business rules.
    ///
    /// The result is ordered: structural failures in schema order (row order
    /// within a column), then rule failures in declaration order. An empty
    /// result means the table is valid.
    #[must_use]
    pub fn validate(&self, table: &Table, kind: TemplateKind) -> Vec<ValidationError> {
        let schema = Schema::for_kind(kind);
        let mut errors = Vec::new();

        for spec in &schema.columns {
            check_column(table, spec, &mut errors);
        }
        let structural = errors.len();

        crate::rules::apply(table, kind, &self.config, &mut errors);

        debug!(
            %kind,
            structural,
            rules = errors.len() - structural,
            "validation finished"
        );
        if errors.is_empty() {
            info!(%kind, rows = table.len(), "table is valid");
        } else {
            info!(%kind, failures = errors.len(), "table failed validation");
        }
        errors
    }
}

/// Validates with default settings.
#[must_use]
pub fn validate(table: &Table, kind: TemplateKind) -> Vec<ValidationError> {
    Validator::default().validate(table, kind)
}

fn check_column(table: &Table, spec: &ColumnSpec, errors: &mut Vec<ValidationError>) {
    let Some(column) = spec.locate(table) else {
        if spec.required {
            errors.push(ValidationError::column(spec.name, "missing required column"));
        }
        return;
    };
    let header = column.name();

    for (row, value) in column.values().enumerate() {
        match coerce_value(value, spec.ty) {
            None => errors.push(ValidationError::cell(
                header,
                row,
                format!("could not coerce '{value}' to {}", spec.ty),
            )),
            Some(Coerced::Null) => {
                if !spec.nullable {
                    errors.push(ValidationError::cell(header, row, "null value in non-nullable column"));
                }
            }
            Some(Coerced::Number(n)) => errors.extend(
                spec.constraints
                    .iter()
                    .filter_map(|c| c.check_number(n))
                    .map(|msg| ValidationError::cell(header, row, msg)),
            ),
            Some(Coerced::Text(s)) => errors.extend(
                spec.constraints
                    .iter()
                    .filter_map(|c| c.check_text(&s))
                    .map(|msg| ValidationError::cell(header, row, msg)),
            ),
            Some(Coerced::Date(_)) => {}
        }
    }
}
