//! Output formatting utilities.

use colored::Colorize;
use healthcheck_core::{Table as DataTable, Value};
use healthcheck_portfolio::{Metric, Metrics};
use healthcheck_report::validation_table;
use healthcheck_schema::ValidationError;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use crate::error::CliResult;

/// Prints rows of a `Tabled` type in the given format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            print_rows(data);
            Ok(())
        }
        OutputFormat::Json => print_json(&data),
        OutputFormat::Csv => print_csv(data),
    }
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn print_rows<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
}

fn print_csv<T: Serialize>(data: &[T]) -> CliResult<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints a data table as a rounded text table.
pub fn print_data_table(table: &DataTable) {
    if table.is_empty() {
        println!("{}", "(no rows)".dimmed());
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().cloned());
    for row in table.rows() {
        builder.push_record(row.iter().map(display_value));
    }
    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    println!("{rendered}");
}

/// Writes a data table as CSV: header, then rows.
pub fn print_data_csv(table: &DataTable) -> CliResult<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(ToString::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Cell text for human output; fractions rounded to two places.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Number(n) if n.fract() != 0.0 => format!("{n:.2}"),
        other => other.to_string(),
    }
}

/// Metrics as `[Metric, Value]` rows.
pub fn metric_rows(metrics: &Metrics) -> Vec<KeyValue> {
    metrics
        .iter()
        .map(|(name, m)| match m {
            Metric::Count(n) => KeyValue::new(name, n.to_string()),
            Metric::Value(v) => KeyValue::new(name, format!("{v:.2}")),
        })
        .collect()
}

/// Prints validation failures.
pub fn print_failures(errors: &[ValidationError], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            print_header(&format!("Validation failures ({})", errors.len()));
            print_data_table(&validation_table(errors));
            Ok(())
        }
        OutputFormat::Json => print_json(errors),
        OutputFormat::Csv => print_data_csv(&validation_table(errors)),
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
