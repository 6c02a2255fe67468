//! The read → detect → resolve → validate → transform pipeline.

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use healthcheck_core::TemplateKind;
use healthcheck_portfolio::{transform, AuxiliaryTables, ResultBundle};
use healthcheck_schema::{ValidationError, Validator};
use healthcheck_workbook::{
    detect, read_workbook, read_workbook_path, resolve_sheet, Detection, EmptySheetWarning,
    LoadedWorkbook, SheetResolution,
};
use std::path::Path;
use tracing::{info, warn};

/// How a run ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The sheet validated and was transformed.
    Completed {
        /// Source sheet name.
        sheet: String,
        /// Derived tables and metrics.
        bundle: ResultBundle,
    },
    /// The sheet failed validation; nothing was transformed.
    Invalid {
        /// Source sheet name.
        sheet: String,
        /// Every failure, in validator order.
        errors: Vec<ValidationError>,
    },
    /// The sheet exists but has no rows.
    EmptySheet(EmptySheetWarning),
}

impl PipelineOutcome {
    /// Returns true for [`PipelineOutcome::Completed`].
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// The bundle of a completed run.
    #[must_use]
    pub fn bundle(&self) -> Option<&ResultBundle> {
        match self {
            Self::Completed { bundle, .. } => Some(bundle),
            _ => None,
        }
    }

    /// Validation failures; empty unless the run is invalid.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Sheet the run worked on.
    #[must_use]
    pub fn sheet(&self) -> &str {
        match self {
            Self::Completed { sheet, .. } | Self::Invalid { sheet, .. } => sheet,
            Self::EmptySheet(warning) => &warning.sheet,
        }
    }
}

/// One finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    /// What detection found, before any override.
    pub detection: Detection,
    /// Kind the run used: the override if given, else the detected kind.
    pub kind: TemplateKind,
    /// How the run ended.
    pub outcome: PipelineOutcome,
}

impl PipelineRun {
    /// Returns true if the caller's override replaced the detected kind.
    #[must_use]
    pub fn overridden(&self) -> bool {
        self.kind != self.detection.kind
    }
}

/// Runs documents through every stage with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
    validator: Validator,
}

impl Pipeline {
    /// Creates a pipeline.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let validator = Validator::new(config.validation);
        Self { config, validator }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs a document held in memory.
    ///
    /// # Errors
    ///
    /// Fails if the bytes are not a spreadsheet or no sheet resolves for the
    /// effective kind.
    pub fn run(
        &self,
        bytes: &[u8],
        kind_override: Option<TemplateKind>,
    ) -> PipelineResult<PipelineRun> {
        let loaded = read_workbook(bytes)?;
        self.run_loaded(&loaded, kind_override)
    }

    /// Runs a document from disk.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run), plus file read failures.
    pub fn run_path(
        &self,
        path: impl AsRef<Path>,
        kind_override: Option<TemplateKind>,
    ) -> PipelineResult<PipelineRun> {
        let loaded = read_workbook_path(path)?;
        self.run_loaded(&loaded, kind_override)
    }

    /// Runs an already parsed document.
    ///
    /// # Errors
    ///
    /// Fails if no sheet resolves for the effective kind.
    pub fn run_loaded(
        &self,
        loaded: &LoadedWorkbook,
        kind_override: Option<TemplateKind>,
    ) -> PipelineResult<PipelineRun> {
        let workbook = &loaded.workbook;
        let detection = detect(workbook, loaded.metadata.as_deref());
        let kind = kind_override.unwrap_or(detection.kind);
        if kind != detection.kind {
            info!(detected = %detection.kind, %kind, "template kind overridden");
        }

        let outcome = match resolve_sheet(workbook, kind)? {
            SheetResolution::Empty(warning) => {
                warn!(sheet = %warning.sheet, %kind, "positions sheet is empty");
                PipelineOutcome::EmptySheet(warning)
            }
            SheetResolution::Found { name, table } => {
                let errors = self.validator.validate(table, kind);
                if errors.is_empty() {
                    let auxiliary = AuxiliaryTables::from_workbook(workbook);
                    let bundle = transform(table, kind, &auxiliary, &self.config.analytics);
                    PipelineOutcome::Completed {
                        sheet: name.to_string(),
                        bundle,
                    }
                } else {
                    PipelineOutcome::Invalid {
                        sheet: name.to_string(),
                        errors,
                    }
                }
            }
        };

        info!(
            %kind,
            sheet = outcome.sheet(),
            completed = outcome.is_completed(),
            "pipeline run finished"
        );
        Ok(PipelineRun {
            detection,
            kind,
            outcome,
        })
    }
}
