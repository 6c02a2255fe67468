//! Maturity and duration buckets.

use serde::{Deserialize, Serialize};

/// Year-based risk bucket shared by the maturity ladder and duration profile.
///
/// Intervals are right-open: `(-inf, 1)`, `[1, 3)`, `[3, 5)`, `[5, 7)`,
/// `[7, 10)`, `[10, inf)`. Negative values fall in the first bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenorBucket {
    /// Under 1 year.
    UnderOne,
    /// 1 to 3 years.
    OneToThree,
    /// 3 to 5 years.
    ThreeToFive,
    /// 5 to 7 years.
    FiveToSeven,
    /// 7 to 10 years.
    SevenToTen,
    /// 10 years and over.
    TenPlus,
}

impl TenorBucket {
    /// Classifies a value in years. Returns `None` for NaN.
    #[must_use]
    pub fn from_years(years: f64) -> Option<Self> {
        if years.is_nan() {
            None
        } else if years < 1.0 {
            Some(Self::UnderOne)
        } else if years < 3.0 {
            Some(Self::OneToThree)
        } else if years < 5.0 {
            Some(Self::ThreeToFive)
        } else if years < 7.0 {
            Some(Self::FiveToSeven)
        } else if years < 10.0 {
            Some(Self::SevenToTen)
        } else {
            Some(Self::TenPlus)
        }
    }

    /// Returns all buckets, shortest first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::UnderOne,
            Self::OneToThree,
            Self::ThreeToFive,
            Self::FiveToSeven,
            Self::SevenToTen,
            Self::TenPlus,
        ]
    }

    /// Label used in the maturity ladder.
    #[must_use]
    pub fn maturity_label(&self) -> &'static str {
        match self {
            Self::UnderOne => "0-1y",
            Self::OneToThree => "1-3y",
            Self::ThreeToFive => "3-5y",
            Self::FiveToSeven => "5-7y",
            Self::SevenToTen => "7-10y",
            Self::TenPlus => "10y+",
        }
    }

    /// Label used in the duration profile.
    #[must_use]
    pub fn duration_label(&self) -> &'static str {
        match self {
            Self::UnderOne => "0-1",
            Self::OneToThree => "1-3",
            Self::ThreeToFive => "3-5",
            Self::FiveToSeven => "5-7",
            Self::SevenToTen => "7-10",
            Self::TenPlus => "10+",
        }
    }
}
