//! Validate command: schema and business rules only.

use anyhow::Result;
use clap::Args;
use healthcheck_core::TemplateKind;
use healthcheck_schema::Validator;
use healthcheck_workbook::{detect, read_workbook_path, resolve_sheet, SheetResolution};
use std::path::{Path, PathBuf};
use tracing::info;

use super::load_config;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_failures, print_json, print_success, print_warning};

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Spreadsheet to validate
    pub file: PathBuf,

    /// Template kind, overriding detection
    #[arg(short, long)]
    pub template: Option<TemplateKind>,
}

/// Execute the validate command.
pub fn execute(args: ValidateArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = load_config(config)?;
    let loaded = read_workbook_path(&args.file)?;
    let kind = args
        .template
        .unwrap_or_else(|| detect(&loaded.workbook, loaded.metadata.as_deref()).kind);

    let (sheet, table) = match resolve_sheet(&loaded.workbook, kind)? {
        SheetResolution::Found { name, table } => (name, table),
        SheetResolution::Empty(warning) => {
            print_warning(&warning.message());
            return Ok(());
        }
    };

    let errors = Validator::new(config.validation).validate(table, kind);
    info!(%kind, sheet, failures = errors.len(), "validated");

    if errors.is_empty() {
        match format {
            OutputFormat::Json => print_json(&errors)?,
            _ => print_success(&format!("{sheet} is a valid {kind} sheet ({} rows)", table.len())),
        }
        return Ok(());
    }

    print_failures(&errors, format)?;
    Err(CliError::ValidationFailed(errors.len()).into())
}
