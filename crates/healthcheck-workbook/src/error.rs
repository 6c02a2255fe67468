//! Error types for workbook ingestion.

use thiserror::Error;

/// Result type for workbook operations.
pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Fatal ingestion errors. Either one ends the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkbookError {
    /// The document is not a readable spreadsheet container.
    #[error("Template read failed: {reason}")]
    Read {
        /// Parser message.
        reason: String,
    },

    /// No sheet resolves to the table required by the template kind.
    #[error("Missing required sheet: '{expected}' (found: {})", available.join(", "))]
    MissingSheet {
        /// The canonical sheet name that was looked for.
        expected: String,
        /// Sheet names present in the workbook.
        available: Vec<String>,
    },
}

impl WorkbookError {
    /// Creates a read error.
    #[must_use]
    pub fn read(reason: impl Into<String>) -> Self {
        Self::Read {
            reason: reason.into(),
        }
    }

    /// Creates a missing sheet error.
    #[must_use]
    pub fn missing_sheet(expected: impl Into<String>, available: Vec<String>) -> Self {
        Self::MissingSheet {
            expected: expected.into(),
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorkbookError::read("invalid zip header");
        assert!(err.to_string().contains("invalid zip header"));

        let err = WorkbookError::missing_sheet(
            "EquityAssetList",
            vec!["Meta".to_string(), "Sheet1".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Missing required sheet: 'EquityAssetList' (found: Meta, Sheet1)"
        );
    }
}
