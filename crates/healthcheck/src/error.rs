//! Pipeline error types.

use healthcheck_workbook::WorkbookError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fatal pipeline errors.
///
/// Validation failures and empty sheets are outcomes, not errors; see
/// [`PipelineOutcome`](crate::PipelineOutcome).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The document could not be read or the required sheet is missing.
    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {reason}")]
    ConfigFile {
        /// Config file path.
        path: String,
        /// OS error message.
        reason: String,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("Invalid config: {0}")]
    ConfigParse(String),

    /// A configuration value is out of range.
    #[error("Invalid config value '{field}': {message}")]
    Config {
        /// Dotted field path.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl PipelineError {
    /// Creates a config file error.
    #[must_use]
    pub fn config_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a config value error.
    #[must_use]
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for PipelineError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}
