//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::{CheckArgs, DetectArgs, ReportArgs, SchemaArgs, ValidateArgs};

/// Health Check - portfolio spreadsheet validation and aggregation
#[derive(Parser)]
#[command(name = "healthcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Pipeline config file (TOML)
    #[arg(short, long, global = true, env = "HEALTHCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and print the result bundle
    Check(CheckArgs),

    /// Show the detected template kind and the sheets of a document
    Detect(DetectArgs),

    /// Validate a document without aggregating it
    Validate(ValidateArgs),

    /// Print the declared columns of a template
    Schema(SchemaArgs),

    /// Write the result bundle or validation failures to a spreadsheet
    Report(ReportArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
