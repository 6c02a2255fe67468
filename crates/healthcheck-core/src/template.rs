//! Template kinds.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The three supported document shapes.
///
/// The kind decides which schema validates the document and which
/// aggregation engine transforms it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum TemplateKind {
    /// Multi-asset master list valued in USD.
    #[default]
    PortfolioMaster,
    /// Single-stock equity position list.
    EquityAssetList,
    /// Bond position list.
    FixedIncomeAssetList,
}

impl TemplateKind {
    /// Returns all kinds in detection order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::PortfolioMaster,
            Self::EquityAssetList,
            Self::FixedIncomeAssetList,
        ]
    }

    /// Returns the canonical name, which is also the expected sheet name.
    #[must_use]
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::PortfolioMaster => "PortfolioMaster",
            Self::EquityAssetList => "EquityAssetList",
            Self::FixedIncomeAssetList => "FixedIncomeAssetList",
        }
    }

    /// Returns the sheet that holds the positions for this kind.
    #[must_use]
    pub fn sheet_name(&self) -> &'static str {
        self.canonical_name()
    }

    /// Lower-case markers searched for inside the `Meta` string.
    #[must_use]
    pub fn metadata_markers(&self) -> &'static [&'static str] {
        match self {
            Self::PortfolioMaster => &["portfoliomaster", "pastor"],
            Self::EquityAssetList => &["equityassetlist"],
            Self::FixedIncomeAssetList => &["fixedincomeassetlist", "fixed income"],
        }
    }

    /// Lower-case sheet names that identify this kind.
    #[must_use]
    pub fn sheet_markers(&self) -> &'static [&'static str] {
        match self {
            Self::PortfolioMaster => &["portfoliomaster", "pastor"],
            Self::EquityAssetList => &["equityassetlist"],
            Self::FixedIncomeAssetList => &["fixedincomeassetlist", "fixedincome"],
        }
    }

    /// Legacy sheet name accepted when the canonical sheet is missing.
    #[must_use]
    pub fn legacy_sheet_alias(&self) -> Option<&'static str> {
        match self {
            Self::PortfolioMaster => Some("Pastor"),
            _ => None,
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

impl FromStr for TemplateKind {
    type Err = CoreError;

    /// Parses canonical names case-insensitively, ignoring `-`, `_` and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "portfoliomaster" | "pastor" => Ok(Self::PortfolioMaster),
            "equityassetlist" | "equity" => Ok(Self::EquityAssetList),
            "fixedincomeassetlist" | "fixedincome" => Ok(Self::FixedIncomeAssetList),
            _ => Err(CoreError::unknown_template(s)),
        }
    }
}
