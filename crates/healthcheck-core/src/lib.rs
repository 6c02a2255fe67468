//! # Health Check Core
//!
//! Core types shared by every stage of the portfolio health check pipeline.
//!
//! - **Values**: [`Value`], a single spreadsheet cell (text, number, boolean, date or empty)
//! - **Tables**: [`Table`], named columns over rows of cells, with [`Column`] views
//! - **Workbooks**: [`Workbook`], an ordered set of named tables
//! - **Templates**: [`TemplateKind`], the three supported document shapes
//! - **Coercion**: [`coerce`], explicit typed conversion of cells with per-cell failures
//!
//! ## Example
//!
//! ```rust
//! use healthcheck_core::prelude::*;
//!
//! let mut table = Table::new(["Asset Class", "USD Total"]);
//! table.push_row(vec![Value::from("Equity"), Value::from(600.0)]);
//! table.push_row(vec![Value::from("Bond"), Value::from(400.0)]);
//!
//! let usd = table.column("USD Total").unwrap();
//! let total: f64 = numeric_values(&usd).iter().flatten().sum();
//! assert_eq!(total, 1000.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod coerce;
pub mod error;
pub mod table;
pub mod template;
pub mod value;
pub mod workbook;

pub use coerce::{
    coerce_column, coerce_value, date_values, numeric_values, text_values, CellFailure, Coerced,
    CoercedColumn, SemanticType,
};
pub use error::{CoreError, CoreResult};
pub use table::{Column, Table};
pub use template::TemplateKind;
pub use value::Value;
pub use workbook::{Sheet, Workbook};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::coerce::{
        coerce_column, coerce_value, date_values, numeric_values, text_values, Coerced,
        SemanticType,
    };
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::table::{Column, Table};
    pub use crate::template::TemplateKind;
    pub use crate::value::Value;
    pub use crate::workbook::Workbook;
}
