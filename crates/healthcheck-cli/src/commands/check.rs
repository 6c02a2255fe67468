//! Check command: the full pipeline.

use anyhow::Result;
use clap::Args;
use healthcheck::{Pipeline, PipelineOutcome, PipelineRun, TemplateKind};
use healthcheck_portfolio::{Output, ResultBundle};
use healthcheck_schema::ValidationError;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::load_config;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{
    metric_rows, print_data_table, print_failures, print_header, print_info,
    print_json, print_output, print_success, print_warning,
};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Spreadsheet to check
    pub file: PathBuf,

    /// Template kind, overriding detection
    #[arg(short, long)]
    pub template: Option<TemplateKind>,
}

/// Machine-readable summary of one run.
#[derive(Serialize)]
struct RunReport<'a> {
    template: TemplateKind,
    detected: TemplateKind,
    source: String,
    sheet: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bundle: Option<&'a ResultBundle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [ValidationError]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

impl<'a> RunReport<'a> {
    fn new(run: &'a PipelineRun) -> Self {
        let (status, warning) = match &run.outcome {
            PipelineOutcome::Completed { .. } => ("completed", None),
            PipelineOutcome::Invalid { .. } => ("invalid", None),
            PipelineOutcome::EmptySheet(w) => ("empty", Some(w.message())),
        };
        Self {
            template: run.kind,
            detected: run.detection.kind,
            source: run.detection.source.to_string(),
            sheet: run.outcome.sheet(),
            status,
            bundle: run.outcome.bundle(),
            errors: Some(run.outcome.errors()).filter(|e| !e.is_empty()),
            warning,
        }
    }
}

/// Execute the check command.
pub fn execute(args: CheckArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let pipeline = Pipeline::new(load_config(config)?);
    let run = pipeline.run_path(&args.file, args.template)?;

    match format {
        OutputFormat::Json => print_json(&RunReport::new(&run))?,
        OutputFormat::Table | OutputFormat::Csv => print_run(&run, format)?,
    }

    match &run.outcome {
        PipelineOutcome::Invalid { errors, .. } => {
            Err(CliError::ValidationFailed(errors.len()).into())
        }
        _ => Ok(()),
    }
}

fn print_run(run: &PipelineRun, format: OutputFormat) -> Result<(), CliError> {
    let table_view = format == OutputFormat::Table;
    if table_view {
        let mut kind = format!("{} ({})", run.kind, run.detection.source);
        if run.overridden() {
            kind = format!("{} (override, detected {})", run.kind, run.detection.kind);
        }
        print_info(&format!("Template: {kind}"));
        print_info(&format!("Sheet: {}", run.outcome.sheet()));
    }

    match &run.outcome {
        PipelineOutcome::Completed { bundle, .. } => {
            for (key, output) in bundle.iter() {
                match output {
                    Output::Metrics(metrics) => {
                        if table_view {
                            print_header(key);
                        }
                        print_output(&metric_rows(metrics), format)?;
                    }
                    Output::Table(table) if table_view => {
                        print_header(key);
                        print_data_table(table);
                    }
                    Output::Table(_) => {}
                }
            }
            if table_view {
                println!();
                print_success(&format!("{} outputs computed", bundle.len()));
            } else {
                print_warning(&format!(
                    "CSV output holds the metrics only; {} tables were left out. \
                     Use `healthcheck report` to export them.",
                    bundle.tables().count()
                ));
            }
        }
        PipelineOutcome::Invalid { errors, .. } => print_failures(errors, format)?,
        PipelineOutcome::EmptySheet(warning) => print_warning(&warning.message()),
    }
    Ok(())
}
