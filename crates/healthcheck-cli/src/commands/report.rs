//! Report command: writes results to a spreadsheet.

use anyhow::{Context, Result};
use clap::Args;
use healthcheck::{Pipeline, PipelineOutcome, TemplateKind};
use healthcheck_report::{write_bundle_path, write_validation_path};
use std::path::{Path, PathBuf};

use super::load_config;
use crate::error::CliError;
use crate::output::{print_error, print_success, print_warning};

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Spreadsheet to process
    pub file: PathBuf,

    /// Where to write the result workbook
    #[arg(short, long)]
    pub out: PathBuf,

    /// Where to write validation failures (defaults to --out)
    #[arg(long)]
    pub validation_out: Option<PathBuf>,

    /// Template kind, overriding detection
    #[arg(short, long)]
    pub template: Option<TemplateKind>,
}

/// Execute the report command.
pub fn execute(args: ReportArgs, config: Option<&Path>) -> Result<()> {
    let pipeline = Pipeline::new(load_config(config)?);
    let run = pipeline.run_path(&args.file, args.template)?;

    match &run.outcome {
        PipelineOutcome::Completed { bundle, .. } => {
            write_bundle_path(bundle, &args.out)
                .with_context(|| format!("Failed to write {}", args.out.display()))?;
            print_success(&format!(
                "Wrote {} outputs for {} to {}",
                bundle.len(),
                run.kind,
                args.out.display()
            ));
            Ok(())
        }
        PipelineOutcome::Invalid { errors, .. } => {
            let out = args.validation_out.as_ref().unwrap_or(&args.out);
            write_validation_path(errors, out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            print_error(&format!(
                "{} validation failure(s) written to {}",
                errors.len(),
                out.display()
            ));
            Err(CliError::ValidationFailed(errors.len()).into())
        }
        PipelineOutcome::EmptySheet(warning) => {
            print_warning(&warning.message());
            Ok(())
        }
    }
}
