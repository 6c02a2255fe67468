//! Spreadsheet cell values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell as read from a worksheet.
///
/// Integers read from a workbook are stored as [`Value::Number`]; the pipeline
/// never distinguishes integer and floating point cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Blank cell.
    #[default]
    Empty,
    /// Boolean cell.
    Bool(bool),
    /// Numeric cell.
    Number(f64),
    /// Date or date-time cell.
    Date(NaiveDateTime),
    /// Text cell.
    Text(String),
}

impl Value {
    /// Returns true for a blank cell.
    ///
    /// Whitespace-only text is also treated as blank, matching how a
    /// spreadsheet user reads it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the numeric content, if this is a number cell.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text content, if this is a text cell.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the calendar date, if this is a date cell.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Creates a date cell at midnight.
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self::Date(date.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Date(dt) => {
                if dt.time() == NaiveTime::MIN {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(Value::Empty.is_empty());
        assert!(Value::from("   ").is_empty());
        assert!(!Value::from("x").is_empty());
        assert!(!Value::from(0.0).is_empty());
        assert!(!Value::from(false).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(600.0).to_string(), "600");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(true).to_string(), "True");
        assert_eq!(Value::Empty.to_string(), "");

        let d = NaiveDate::from_ymd_opt(2030, 1, 15).unwrap();
        assert_eq!(Value::from(d).to_string(), "2030-01-15");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<f64>), Value::Empty);
        assert_eq!(Value::from(Some("USD")), Value::Text("USD".into()));
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&vec![Value::from("Equity"), Value::from(600.0), Value::Empty])
            .unwrap();
        assert_eq!(json, r#"["Equity",600.0,null]"#);
    }
}
