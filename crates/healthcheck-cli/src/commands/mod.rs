//! CLI command implementations.

pub mod check;
pub mod detect;
pub mod report;
pub mod schema;
pub mod validate;

pub use check::CheckArgs;
pub use detect::DetectArgs;
pub use report::ReportArgs;
pub use schema::SchemaArgs;
pub use validate::ValidateArgs;

use anyhow::{Context, Result};
use healthcheck::PipelineConfig;
use std::path::Path;
use tracing::debug;

/// Loads the pipeline config, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            PipelineConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => Ok(PipelineConfig::default()),
    }
}
