//! # Health Check Report
//!
//! Spreadsheet export for health check results.
//!
//! - [`write_bundle`]: a `Summary` worksheet with the headline metrics, then
//!   one worksheet per derived table in bundle order
//! - [`write_validation`]: a single worksheet of validation failures with
//!   columns `column`, `index`, `failure`
//!
//! Worksheet names are cut to 31 characters, stripped of characters a
//! spreadsheet rejects and made unique.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
mod sheet_name;
pub mod validation;
pub mod writer;

pub use error::{ReportError, ReportResult};
pub use sheet_name::{sanitize_sheet_name, MAX_SHEET_NAME};
pub use validation::{
    validation_report, validation_table, write_validation, write_validation_path,
    VALIDATION_SHEET,
};
pub use writer::{bundle_report, write_bundle, write_bundle_path, ReportBuilder, SUMMARY_SHEET};
