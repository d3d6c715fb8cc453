//! Healthcare attractiveness scoring.
//!
//! Converts a batch of [`Geography`] records into 0–100 composite
//! scores. Normalization is percentile-based: each factor's raw value
//! is ranked within the batch (average-rank tie semantics) and scaled
//! to [0, 100]. Threshold bonuses then reward raw values in the ranges
//! a facility planner cares about, and a fixed weighted sum produces
//! the composite.
//!
//! Because ranks are relative, a score is only meaningful in the
//! context of the batch it was computed with. The full batch must be
//! materialized before scoring begins — there is deliberately no
//! streaming or per-record variant.

use care_map_geography_models::Geography;
use care_map_geography_models::score::{
    AttractivenessCategory, AttractivenessScore, ComponentScores,
};

/// Factor weights; sum to 1.0.
pub const WEIGHT_DENSITY: f64 = 0.25;
/// Population growth weight.
pub const WEIGHT_GROWTH: f64 = 0.20;
/// Senior population (65+) weight.
pub const WEIGHT_SENIOR: f64 = 0.25;
/// Income level weight.
pub const WEIGHT_INCOME: f64 = 0.20;
/// Young-family (under 18) weight.
pub const WEIGHT_YOUNG_FAMILY: f64 = 0.10;

/// Scores every geography in the batch.
///
/// An empty batch yields an empty result — callers are expected to
/// materialize their geographies first, and scoring nothing is a
/// caller mistake, not a crash.
#[must_use]
pub fn score_batch(geographies: &[Geography]) -> Vec<AttractivenessScore> {
    if geographies.is_empty() {
        return Vec::new();
    }

    let density_raw: Vec<f64> = geographies.iter().map(|g| g.population_density).collect();
    let growth_raw: Vec<f64> = geographies
        .iter()
        .map(|g| g.population_growth_rate)
        .collect();
    let senior_raw: Vec<f64> = geographies
        .iter()
        .map(|g| g.age_percentages.senior())
        .collect();
    let income_raw: Vec<f64> = geographies
        .iter()
        .map(|g| g.median_household_income)
        .collect();
    let young_raw: Vec<f64> = geographies
        .iter()
        .map(|g| g.age_percentages.young_family())
        .collect();

    let density = bonused(&density_raw, density_bonus);
    let growth = bonused(&growth_raw, growth_bonus);
    let senior = bonused(&senior_raw, senior_bonus);
    let income = bonused(&income_raw, income_bonus);
    let young_family = bonused(&young_raw, young_family_bonus);

    geographies
        .iter()
        .enumerate()
        .map(|(i, geography)| {
            // The composite is a weighted sum of the bonused (unclipped)
            // factor scores; only the composite and the recorded
            // per-factor values are clipped.
            let composite = (density[i] * WEIGHT_DENSITY
                + growth[i] * WEIGHT_GROWTH
                + senior[i] * WEIGHT_SENIOR
                + income[i] * WEIGHT_INCOME
                + young_family[i] * WEIGHT_YOUNG_FAMILY)
                .clamp(0.0, 100.0);

            AttractivenessScore {
                geography_id: geography.id.clone(),
                composite_score: composite,
                category: AttractivenessCategory::from_score(composite),
                component_scores: ComponentScores {
                    density: density[i].clamp(0.0, 100.0),
                    growth: growth[i].clamp(0.0, 100.0),
                    senior: senior[i].clamp(0.0, 100.0),
                    income: income[i].clamp(0.0, 100.0),
                    young_family: young_family[i].clamp(0.0, 100.0),
                },
            }
        })
        .collect()
}

/// Percentile ranks of `values` within the batch, scaled to [0, 100].
///
/// Average-rank tie semantics: equal values share the mean of the
/// ordinal ranks they span. A batch of one ranks at 100 (degenerate
/// but well-defined).
#[must_use]
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    #[allow(clippy::cast_precision_loss)]
    let scale = 100.0 / n as f64;
    let mut ranks = vec![0.0; n];

    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]].total_cmp(&values[order[start]]).is_eq() {
            end += 1;
        }
        // Ordinal ranks are 1-based; ties share the mean of their span.
        #[allow(clippy::cast_precision_loss)]
        let average_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = average_rank * scale;
        }
        start = end;
    }

    ranks
}

fn bonused(raw: &[f64], bonus: fn(f64) -> f64) -> Vec<f64> {
    percentile_ranks(raw)
        .into_iter()
        .zip(raw.iter())
        .map(|(rank, &value)| rank * bonus(value))
        .collect()
}

/// Very dense urban cores earn a 20% bonus.
fn density_bonus(raw: f64) -> f64 {
    if raw > 1000.0 { 1.2 } else { 1.0 }
}

/// High-growth areas earn a 30% bonus.
fn growth_bonus(raw: f64) -> f64 {
    if raw > 2.0 { 1.3 } else { 1.0 }
}

/// Heavy senior populations (more healthcare needs) earn a 40% bonus.
fn senior_bonus(raw: f64) -> f64 {
    if raw > 20.0 { 1.4 } else { 1.0 }
}

/// High income earns 20% (better commercial insurance); moderate income
/// earns 10% (stable payer mix).
fn income_bonus(raw: f64) -> f64 {
    if raw > 75_000.0 {
        1.2
    } else if raw >= 50_000.0 {
        1.1
    } else {
        1.0
    }
}

/// Moderate young-family share (pediatrics, OB-GYN demand) earns 30%.
fn young_family_bonus(raw: f64) -> f64 {
    if (15.0..=25.0).contains(&raw) { 1.3 } else { 1.0 }
}
