//! Template kind detection.

use healthcheck_core::{TemplateKind, Workbook};
use tracing::debug;

/// Which rule produced a [`Detection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionSource {
    /// A marker matched the `Meta` string.
    Metadata,
    /// A sheet name matched.
    SheetName,
    /// Nothing matched.
    Default,
}

impl std::fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Metadata => "metadata",
            Self::SheetName => "sheet name",
            Self::Default => "default",
        };
        write!(f, "{s}")
    }
}

/// Result of template detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Detected kind.
    pub kind: TemplateKind,
    /// Which rule produced it.
    pub source: DetectionSource,
}

/// Classifies a workbook, reporting which rule matched.
///
/// Rules, first match wins, kinds tried in declaration order:
/// 1. a kind's metadata marker is a case-insensitive substring of `metadata`
/// 2. a sheet name equals one of a kind's sheet markers, ignoring case
/// 3. [`TemplateKind::PortfolioMaster`]
#[must_use]
pub fn detect(workbook: &Workbook, metadata: Option<&str>) -> Detection {
    if let Some(meta) = metadata.map(str::to_lowercase).filter(|m| !m.is_empty()) {
        let hit = TemplateKind::all()
            .iter()
            .find(|kind| kind.metadata_markers().iter().any(|m| meta.contains(m)));
        if let Some(&kind) = hit {
            debug!(%kind, "template detected from metadata");
            return Detection {
                kind,
                source: DetectionSource::Metadata,
            };
        }
    }

    let names: Vec<String> = workbook
        .sheet_names()
        .iter()
        .map(|n| n.trim().to_lowercase())
        .collect();
    let hit = TemplateKind::all().iter().find(|kind| {
        kind.sheet_markers()
            .iter()
            .any(|m| names.iter().any(|n| n == m))
    });
    if let Some(&kind) = hit {
        debug!(%kind, "template detected from sheet names");
        return Detection {
            kind,
            source: DetectionSource::SheetName,
        };
    }

    debug!("no template marker found, defaulting");
    Detection {
        kind: TemplateKind::default(),
        source: DetectionSource::Default,
    }
}

/// Classifies a workbook. Never fails.
#[must_use]
pub fn detect_template(workbook: &Workbook, metadata: Option<&str>) -> TemplateKind {
    detect(workbook, metadata).kind
}
