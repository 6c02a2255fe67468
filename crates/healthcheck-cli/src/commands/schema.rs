//! Schema command: declared columns of a template.

use anyhow::Result;
use clap::Args;
use healthcheck_core::TemplateKind;
use healthcheck_schema::{ColumnSpec, Schema};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_output};

/// Arguments for the schema command.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Template kind (e.g. portfolio-master, equity-asset-list)
    pub template: TemplateKind,
}

#[derive(Serialize, Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Type")]
    ty: String,
    #[tabled(rename = "Required")]
    required: bool,
    #[tabled(rename = "Nullable")]
    nullable: bool,
    #[tabled(rename = "Aliases")]
    aliases: String,
    #[tabled(rename = "Constraints")]
    constraints: String,
}

impl From<&ColumnSpec> for ColumnRow {
    fn from(spec: &ColumnSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            ty: spec.ty.name().to_string(),
            required: spec.required,
            nullable: spec.nullable,
            aliases: spec.aliases.join(", "),
            constraints: spec
                .constraints
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Execute the schema command.
pub fn execute(args: SchemaArgs, format: OutputFormat) -> Result<()> {
    let schema = Schema::for_kind(args.template);

    match format {
        OutputFormat::Json => print_json(schema)?,
        _ => {
            let rows: Vec<ColumnRow> = schema.columns.iter().map(ColumnRow::from).collect();
            if format == OutputFormat::Table {
                print_header(&format!("{} ({} columns)", schema.kind, rows.len()));
            }
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
