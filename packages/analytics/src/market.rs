//! Market share and concentration analysis.
//!
//! From raw (geography, competitor) interaction records, computes each
//! competitor's market share per geography, the dominant competitor,
//! and the Herfindahl-Hirschman Index. Grouping uses ordered maps, so
//! output order is deterministic and dominance ties break
//! lexicographically on competitor name.
//!
//! Competitor labels are taken as given — callers must collapse name
//! variants of the same system (see [`crate::normalize`]) before
//! analysis, or shares silently fragment across the variants.

use std::collections::BTreeMap;

use care_map_geography_models::market::{
    ConcentrationResult, HhiInterpretation, Interaction, MarketShareRecord,
};

/// Per-geography market shares and concentration metrics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketAnalysis {
    /// One record per (geography, competitor) pair, ordered by
    /// geography then competitor.
    pub shares: Vec<MarketShareRecord>,
    /// One record per geography with at least one interaction.
    pub concentration: Vec<ConcentrationResult>,
}

/// Analyzes a batch of interaction records.
///
/// A geography with zero interactions is simply absent from the
/// output. Pure function: identical input yields identical output.
#[must_use]
pub fn analyze(interactions: &[Interaction]) -> MarketAnalysis {
    let mut counts: BTreeMap<&str, BTreeMap<&str, u64>> = BTreeMap::new();
    for interaction in interactions {
        *counts
            .entry(interaction.geography_id.as_str())
            .or_default()
            .entry(interaction.competitor.as_str())
            .or_default() += 1;
    }

    let mut analysis = MarketAnalysis::default();

    for (geography_id, by_competitor) in &counts {
        let total: u64 = by_competitor.values().sum();
        if total == 0 {
            continue;
        }

        let mut hhi = 0.0;
        let mut dominant: Option<(&str, f64)> = None;

        for (competitor, &count) in by_competitor {
            #[allow(clippy::cast_precision_loss)]
            let share = count as f64 / total as f64;
            hhi += share * share;

            // Strictly-greater comparison over the sorted map keeps the
            // lexicographically first competitor on ties.
            if dominant.is_none_or(|(_, best)| share > best) {
                dominant = Some((competitor, share));
            }

            analysis.shares.push(MarketShareRecord {
                geography_id: (*geography_id).to_string(),
                competitor: (*competitor).to_string(),
                interaction_count: count,
                share,
            });
        }

        let hhi = hhi * 10_000.0;
        if let Some((competitor, _)) = dominant {
            analysis.concentration.push(ConcentrationResult {
                geography_id: (*geography_id).to_string(),
                dominant_competitor: competitor.to_string(),
                hhi,
                interpretation: HhiInterpretation::from_hhi(hhi),
            });
        }
    }

    analysis
}
