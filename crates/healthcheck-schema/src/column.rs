//! Column specifications and value constraints.

use healthcheck_core::{Column, SemanticType, Table};
use serde::Serialize;
use std::fmt;

/// A value constraint checked on every non-null cell of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "check", content = "arg", rename_all = "snake_case")]
pub enum Constraint {
    /// Number must be `>= 0`.
    NonNegative,
    /// Text must equal one of the values, ignoring case and surrounding
    /// whitespace.
    OneOf(&'static [&'static str]),
    /// Text must have exactly this many characters after trimming.
    Length(usize),
}

impl Constraint {
    /// Checks a numeric cell. Text-only constraints pass.
    #[must_use]
    pub fn check_number(&self, value: f64) -> Option<String> {
        match self {
            Self::NonNegative if value < 0.0 => {
                Some(format!("value {value} is negative (must be >= 0)"))
            }
            _ => None,
        }
    }

    /// Checks a text cell. Number-only constraints pass.
    #[must_use]
    pub fn check_text(&self, value: &str) -> Option<String> {
        let value = value.trim();
        match self {
            Self::OneOf(allowed) if !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) => {
                Some(format!("'{value}' is not one of [{}]", allowed.join(", ")))
            }
            Self::Length(n) if value.chars().count() != *n => {
                Some(format!("'{value}' must be {n} characters long"))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNegative => write!(f, ">= 0"),
            Self::OneOf(allowed) => write!(f, "one of [{}]", allowed.join(", ")),
            Self::Length(n) => write!(f, "length {n}"),
        }
    }
}

/// Declaration of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    /// Canonical header.
    pub name: &'static str,
    /// Alternative headers accepted in place of `name`.
    pub aliases: Vec<&'static str>,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: SemanticType,
    /// Whether absence of the column is a failure.
    pub required: bool,
    /// Whether empty cells are allowed.
    pub nullable: bool,
    /// Value constraints.
    pub constraints: Vec<Constraint>,
}

impl ColumnSpec {
    /// Optional, nullable column with no constraints.
    #[must_use]
    pub fn new(name: &'static str, ty: SemanticType) -> Self {
        Self {
            name,
            aliases: Vec::new(),
            ty,
            required: false,
            nullable: true,
            constraints: Vec::new(),
        }
    }

    /// Text column.
    #[must_use]
    pub fn text(name: &'static str) -> Self {
        Self::new(name, SemanticType::Text)
    }

    /// Number column.
    #[must_use]
    pub fn number(name: &'static str) -> Self {
        Self::new(name, SemanticType::Number)
    }

    /// Date column.
    #[must_use]
    pub fn date(name: &'static str) -> Self {
        Self::new(name, SemanticType::Date)
    }

    /// Marks the column as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Disallows empty cells.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Accepts an alternative header.
    #[must_use]
    pub fn with_alias(mut self, alias: &'static str) -> Self {
        self.aliases.push(alias);
        self
    }

    /// Adds a constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds [`Constraint::NonNegative`].
    #[must_use]
    pub fn non_negative(self) -> Self {
        self.with_constraint(Constraint::NonNegative)
    }

    /// All headers this column answers to, canonical first.
    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// Finds this column in a table under its name or any alias.
    #[must_use]
    pub fn locate<'t>(&self, table: &'t Table) -> Option<Column<'t>> {
        self.headers().find_map(|h| table.column(h))
    }
}
