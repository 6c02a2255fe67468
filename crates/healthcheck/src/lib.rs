//! # Health Check
//!
//! Validation and aggregation pipeline for portfolio spreadsheets.
//!
//! One run takes an uploaded document through five stages:
//!
//! 1. **Read** every sheet into a table ([`healthcheck_workbook`])
//! 2. **Detect** the template kind from the `Meta` marker or sheet names,
//!    unless the caller overrides it
//! 3. **Resolve** the positions sheet for that kind
//! 4. **Validate** it against the declared schema and business rules
//!    ([`healthcheck_schema`])
//! 5. **Transform** a valid table into a result bundle
//!    ([`healthcheck_portfolio`])
//!
//! Unreadable documents and missing sheets are errors. An empty sheet and a
//! failed validation are [`PipelineOutcome`]s: the run ends cleanly without
//! a bundle.
//!
//! ```rust,ignore
//! use healthcheck::{Pipeline, PipelineConfig, PipelineOutcome};
//!
//! let pipeline = Pipeline::new(PipelineConfig::from_file("healthcheck.toml")?);
//! let run = pipeline.run(&bytes, None)?;
//! match run.outcome {
//!     PipelineOutcome::Completed { bundle, .. } => println!("{}", bundle.len()),
//!     PipelineOutcome::Invalid { errors, .. } => eprintln!("{} failures", errors.len()),
//!     PipelineOutcome::EmptySheet(warning) => eprintln!("{warning}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineOutcome, PipelineRun};

pub use healthcheck_core::{Table, TemplateKind, Value};
pub use healthcheck_portfolio::{AnalyticsConfig, ResultBundle};
pub use healthcheck_schema::{ValidationConfig, ValidationError};
pub use healthcheck_workbook::{Detection, DetectionSource, EmptySheetWarning, WorkbookError};
