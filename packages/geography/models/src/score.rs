//! Attractiveness score types.
//!
//! An [`AttractivenessScore`] is a 0–100 composite of five percentile-
//! normalized demographic factors. Scores are only meaningful relative to
//! the batch they were computed with — percentile ranks are taken within
//! the batch, not against absolute thresholds.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Attractiveness category, assigned from fixed composite-score
/// breakpoints.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "title_case")]
pub enum AttractivenessCategory {
    /// Composite score below 20.
    VeryLow,
    /// Composite score in [20, 40).
    Low,
    /// Composite score in [40, 60).
    Medium,
    /// Composite score in [60, 80).
    High,
    /// Composite score of 80 or above.
    VeryHigh,
}

impl AttractivenessCategory {
    /// Assigns the category for a composite score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::VeryHigh
        } else if score >= 60.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else if score >= 20.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Map color hex for this category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::VeryHigh => "#1f77b4",
            Self::High => "#ff7f0e",
            Self::Medium => "#2ca02c",
            Self::Low => "#d62728",
            Self::VeryLow => "#9467bd",
        }
    }
}

/// Per-factor percentile scores, each clipped to [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    /// Population density factor.
    pub density: f64,
    /// Population growth factor.
    pub growth: f64,
    /// Senior population (65+) factor.
    pub senior: f64,
    /// Household income factor.
    pub income: f64,
    /// Young-family (under 18) factor.
    pub young_family: f64,
}

/// The composite attractiveness score for one geography within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttractivenessScore {
    /// Geography this score belongs to.
    pub geography_id: String,
    /// Weighted composite in [0, 100].
    pub composite_score: f64,
    /// Category from the fixed breakpoints.
    pub category: AttractivenessCategory,
    /// Individual factor scores.
    pub component_scores: ComponentScores,
}
