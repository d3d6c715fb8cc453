//! Market share and concentration types.
//!
//! Derived per batch of interaction records; recomputed, never mutated
//! in place.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A single (geography, competitor) interaction event, e.g. one inpatient
/// discharge attributed to a hospital system in a ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Geography the interaction occurred in (normalized ZIP).
    pub geography_id: String,
    /// Competitor label. Callers must collapse name variants of the same
    /// system before analysis; the analyzer takes labels as given.
    pub competitor: String,
}

/// One competitor's market share within a geography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketShareRecord {
    /// Geography this share was computed for.
    pub geography_id: String,
    /// Competitor label.
    pub competitor: String,
    /// Number of interactions attributed to this competitor.
    pub interaction_count: u64,
    /// Share of the geography's interactions, in [0, 1]. Shares across a
    /// geography's competitors sum to 1 barring floating-point slack.
    pub share: f64,
}

/// Herfindahl-Hirschman Index interpretation, from fixed breakpoints.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "title_case")]
pub enum HhiInterpretation {
    /// HHI below 1500: competitive market.
    Unconcentrated,
    /// HHI in [1500, 2500).
    ModeratelyConcentrated,
    /// HHI of 2500 or above.
    HighlyConcentrated,
}

impl HhiInterpretation {
    /// Assigns the interpretation for an HHI value.
    #[must_use]
    pub fn from_hhi(hhi: f64) -> Self {
        if hhi >= 2500.0 {
            Self::HighlyConcentrated
        } else if hhi >= 1500.0 {
            Self::ModeratelyConcentrated
        } else {
            Self::Unconcentrated
        }
    }
}

/// Market concentration metrics for one geography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationResult {
    /// Geography these metrics were computed for.
    pub geography_id: String,
    /// Competitor with the largest share. Ties break lexicographically
    /// on competitor name.
    pub dominant_competitor: String,
    /// 10000 × Σ share², in [0, 10000].
    pub hhi: f64,
    /// Interpretation from the fixed breakpoints.
    pub interpretation: HhiInterpretation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hhi_breakpoints_are_exact() {
        assert_eq!(
            HhiInterpretation::from_hhi(0.0),
            HhiInterpretation::Unconcentrated
        );
        assert_eq!(
            HhiInterpretation::from_hhi(1499.999),
            HhiInterpretation::Unconcentrated
        );
        assert_eq!(
            HhiInterpretation::from_hhi(1500.0),
            HhiInterpretation::ModeratelyConcentrated
        );
        assert_eq!(
            HhiInterpretation::from_hhi(2499.999),
            HhiInterpretation::ModeratelyConcentrated
        );
        assert_eq!(
            HhiInterpretation::from_hhi(2500.0),
            HhiInterpretation::HighlyConcentrated
        );
        assert_eq!(
            HhiInterpretation::from_hhi(10000.0),
            HhiInterpretation::HighlyConcentrated
        );
    }

    #[test]
    fn interpretation_displays_title_case() {
        assert_eq!(
            HhiInterpretation::ModeratelyConcentrated.to_string(),
            "Moderately Concentrated"
        );
    }
}
