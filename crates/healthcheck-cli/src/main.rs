//! Health Check CLI - validate and aggregate portfolio spreadsheets.
//!
//! # Usage
//!
//! ```bash
//! # Full pipeline: detect, validate, aggregate
//! healthcheck check positions.xlsx
//!
//! # Force the template kind
//! healthcheck check positions.xlsx --template equity-asset-list
//!
//! # Only report validation failures
//! healthcheck validate positions.xlsx --format json
//!
//! # Write the result bundle to a spreadsheet
//! healthcheck report positions.xlsx --out result.xlsx
//!
//! # Show the declared columns of a template
//! healthcheck schema fixed-income-asset-list
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to change the level.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to stderr so stdout stays machine-readable
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Check(args) => commands::check::execute(args, config, format)?,
        Commands::Detect(args) => commands::detect::execute(args, format)?,
        Commands::Validate(args) => commands::validate::execute(args, config, format)?,
        Commands::Schema(args) => commands::schema::execute(args, format)?,
        Commands::Report(args) => commands::report::execute(args, config)?,
    }

    Ok(())
}
