//! Detect command: template kind and sheet overview.

use anyhow::Result;
use clap::Args;
use healthcheck_core::TemplateKind;
use healthcheck_workbook::{detect, read_workbook_path};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Arguments for the detect command.
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Spreadsheet to inspect
    pub file: PathBuf,
}

#[derive(Serialize, Tabled)]
struct SheetRow {
    #[tabled(rename = "Sheet")]
    name: String,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Columns")]
    columns: usize,
}

#[derive(Serialize)]
struct DetectReport {
    template: TemplateKind,
    source: String,
    metadata: Option<String>,
    sheets: Vec<SheetRow>,
}

/// Execute the detect command.
pub fn execute(args: DetectArgs, format: OutputFormat) -> Result<()> {
    let loaded = read_workbook_path(&args.file)?;
    let detection = detect(&loaded.workbook, loaded.metadata.as_deref());

    let sheets: Vec<SheetRow> = loaded
        .workbook
        .iter()
        .map(|sheet| SheetRow {
            name: sheet.name.clone(),
            rows: sheet.table.len(),
            columns: sheet.table.width(),
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&DetectReport {
            template: detection.kind,
            source: detection.source.to_string(),
            metadata: loaded.metadata,
            sheets,
        })?,
        OutputFormat::Table => {
            let summary = vec![
                KeyValue::new("Template", detection.kind.to_string()),
                KeyValue::new("Source", detection.source.to_string()),
                KeyValue::new("Metadata", loaded.metadata.unwrap_or_default()),
            ];
            print_header("Detection");
            print_output(&summary, format)?;
            print_header("Sheets");
            print_output(&sheets, format)?;
        }
        OutputFormat::Csv => print_output(&sheets, format)?,
    }

    Ok(())
}
