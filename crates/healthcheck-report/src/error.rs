//! Error types for report export.

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Report export errors.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The spreadsheet writer rejected an operation.
    #[error("Spreadsheet write failed: {0}")]
    Xlsx(#[from] XlsxError),

    /// A table does not fit in a worksheet.
    #[error("Table '{sheet}' is too large for a worksheet: {rows} rows x {cols} columns")]
    TooLarge {
        /// Target sheet name.
        sheet: String,
        /// Rows including the header.
        rows: usize,
        /// Columns.
        cols: usize,
    },

    /// The report file could not be written.
    #[error("Failed to write report '{path}': {reason}")]
    Io {
        /// Destination path.
        path: String,
        /// OS error message.
        reason: String,
    },
}

impl ReportError {
    /// Creates a too-large error.
    #[must_use]
    pub fn too_large(sheet: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self::TooLarge {
            sheet: sheet.into(),
            rows,
            cols,
        }
    }

    /// Creates an I/O error.
    #[must_use]
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::too_large("top_assets", 2_000_000, 3);
        assert_eq!(
            err.to_string(),
            "Table 'top_assets' is too large for a worksheet: 2000000 rows x 3 columns"
        );

        let err = ReportError::io("/tmp/out.xlsx", "permission denied");
        assert!(err.to_string().contains("/tmp/out.xlsx"));
    }
}
