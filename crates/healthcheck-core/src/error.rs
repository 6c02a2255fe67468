//! Error types for the core crate.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by core type construction and parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A template kind name did not match any known kind.
    #[error("Unknown template kind: '{name}' (expected PortfolioMaster, EquityAssetList or FixedIncomeAssetList)")]
    UnknownTemplate {
        /// The unrecognised name.
        name: String,
    },
}

impl CoreError {
    /// Creates an unknown template error.
    #[must_use]
    pub fn unknown_template(name: impl Into<String>) -> Self {
        Self::UnknownTemplate { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unknown_template("Bonds");
        assert!(err.to_string().contains("'Bonds'"));
    }
}
