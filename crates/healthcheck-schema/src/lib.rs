//! # Health Check Schema
//!
//! Declared column schemas for the three portfolio templates and the
//! validator that checks a [`Table`](healthcheck_core::Table) against them.
//!
//! Validation has two layers, both of which always run:
//!
//! 1. **Structural**: every declared column (found under its name or an
//!    alias) is coerced cell by cell to its semantic type, then checked for
//!    nulls and value constraints. Missing required columns are reported.
//! 2. **Business rules**: `Weight %` totals for equity and bond lists, and
//!    maturity-after-issue for bonds.
//!
//! ```rust
//! use healthcheck_core::{Table, TemplateKind, Value};
//! use healthcheck_schema::validate;
//!
//! let table = Table::with_rows(
//!     ["Asset (Security Name)", "Market Value (USD)", "Weight %"],
//!     vec![
//!         vec![Value::from("Apple"), Value::from(600.0), Value::from(60.0)],
//!         vec![Value::from("Nestle"), Value::from(400.0), Value::from(37.0)],
//!     ],
//! );
//!
//! let errors = validate(&table, TemplateKind::EquityAssetList);
//! assert_eq!(errors.len(), 1);
//! assert!(errors[0].column.is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod column;
mod rules;
pub mod schemas;
pub mod validator;

pub use column::{ColumnSpec, Constraint};
pub use schemas::Schema;
pub use validator::{validate, ValidationConfig, ValidationError, Validator};
