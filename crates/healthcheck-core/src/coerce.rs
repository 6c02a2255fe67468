//! Typed coercion of cells.
//!
//! Spreadsheet columns arrive loosely typed: a number column may hold text
//! such as `"12.5"`, a date column may hold ISO strings. Coercion turns a
//! cell into a typed value or reports that it cannot, and the column-level
//! variant collects every failure with its row index so callers can both use
//! the lenient result (failures become nulls) and inspect what was dropped.

use crate::table::Column;
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Semantic type declared for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    /// Free text.
    Text,
    /// Floating point number.
    Number,
    /// Calendar date.
    Date,
}

impl SemanticType {
    /// Returns a lower-case name for messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A successfully coerced cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// Blank cell.
    Null,
    /// Text value.
    Text(String),
    /// Finite number.
    Number(f64),
    /// Calendar date.
    Date(NaiveDate),
}

impl Coerced {
    /// Returns true for a blank cell.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the number, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the date, if any.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }
}

/// A cell that could not be coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFailure {
    /// Zero-based data row index.
    pub row: usize,
    /// The cell as displayed.
    pub raw: String,
    /// The type that was requested.
    pub expected: SemanticType,
}

/// A coerced column: one entry per row plus the failures.
///
/// Failed cells appear as [`Coerced::Null`] in `values`.
#[derive(Debug, Clone, Default)]
pub struct CoercedColumn {
    /// Coerced cells in row order.
    pub values: Vec<Coerced>,
    /// Cells that could not be coerced.
    pub failures: Vec<CellFailure>,
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%m/%d/%Y", "%d-%b-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Coerces one cell to a semantic type.
///
/// Blank cells (including whitespace-only text) become [`Coerced::Null`] for
/// every type. Returns `None` when the cell holds a value that cannot be
/// represented in the requested type.
#[must_use]
pub fn coerce_value(value: &Value, ty: SemanticType) -> Option<Coerced> {
    if value.is_empty() {
        return Some(Coerced::Null);
    }
    match ty {
        SemanticType::Text => Some(Coerced::Text(value.to_string().trim().to_string())),
        SemanticType::Number => match value {
            Value::Number(n) if n.is_finite() => Some(Coerced::Number(*n)),
            Value::Bool(b) => Some(Coerced::Number(if *b { 1.0 } else { 0.0 })),
            Value::Text(s) => parse_number(s).map(Coerced::Number),
            _ => None,
        },
        SemanticType::Date => match value {
            Value::Date(dt) => Some(Coerced::Date(dt.date())),
            Value::Text(s) => parse_date(s).map(Coerced::Date),
            _ => None,
        },
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Coerces every cell of a column, collecting failures with their row index.
#[must_use]
pub fn coerce_column(column: &Column<'_>, ty: SemanticType) -> CoercedColumn {
    let mut out = CoercedColumn {
        values: Vec::with_capacity(column.len()),
        failures: Vec::new(),
    };
    for (row, value) in column.values().enumerate() {
        match coerce_value(value, ty) {
            Some(c) => out.values.push(c),
            None => {
                out.values.push(Coerced::Null);
                out.failures.push(CellFailure {
                    row,
                    raw: value.to_string(),
                    expected: ty,
                });
            }
        }
    }
    out
}

/// Lenient numeric view of a column: blanks and failures become `None`.
#[must_use]
pub fn numeric_values(column: &Column<'_>) -> Vec<Option<f64>> {
    column
        .values()
        .map(|v| coerce_value(v, SemanticType::Number).and_then(|c| c.as_f64()))
        .collect()
}

/// Lenient text view of a column: blanks become `None`.
#[must_use]
pub fn text_values(column: &Column<'_>) -> Vec<Option<String>> {
    column
        .values()
        .map(|v| match coerce_value(v, SemanticType::Text) {
            Some(Coerced::Text(s)) => Some(s),
            _ => None,
        })
        .collect()
}

/// Lenient date view of a column: blanks and failures become `None`.
#[must_use]
pub fn date_values(column: &Column<'_>) -> Vec<Option<NaiveDate>> {
    column
        .values()
        .map(|v| coerce_value(v, SemanticType::Date).and_then(|c| c.as_date()))
        .collect()
}
