#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geography and market analysis types.
//!
//! These types represent geographic areas (ZIP codes and metropolitan
//! statistical areas) enriched with demographic data, plus the derived
//! attractiveness-score and market-concentration records computed from
//! them. They are shared by the resolver, demographics, and analytics
//! packages.

pub mod market;
pub mod resolution;
pub mod score;

use serde::{Deserialize, Serialize};

/// Normalizes a raw ZIP code string to a 5-digit, zero-padded form.
///
/// Strips all non-digit characters and left-pads with zeros. Returns
/// `None` when the input has no digits or more than five (a malformed
/// code that cannot be interpreted as a ZIP).
#[must_use]
pub fn normalize_zip(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() || digits.len() > 5 {
        return None;
    }
    Some(format!("{digits:0>5}"))
}

/// Population counts for the ten fixed age bands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBandCounts {
    /// Under 5 years.
    pub under_5: u64,
    /// 5 to 17 years.
    pub age_5_17: u64,
    /// 18 to 24 years.
    pub age_18_24: u64,
    /// 25 to 34 years.
    pub age_25_34: u64,
    /// 35 to 44 years.
    pub age_35_44: u64,
    /// 45 to 54 years.
    pub age_45_54: u64,
    /// 55 to 64 years.
    pub age_55_64: u64,
    /// 65 to 74 years.
    pub age_65_74: u64,
    /// 75 to 84 years.
    pub age_75_84: u64,
    /// 85 years and over.
    pub age_85_plus: u64,
}

impl AgeBandCounts {
    /// Sum of all ten bands.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.under_5
            + self.age_5_17
            + self.age_18_24
            + self.age_25_34
            + self.age_35_44
            + self.age_45_54
            + self.age_55_64
            + self.age_65_74
            + self.age_75_84
            + self.age_85_plus
    }

    /// Senior population: 65 and over.
    #[must_use]
    pub const fn senior(&self) -> u64 {
        self.age_65_74 + self.age_75_84 + self.age_85_plus
    }

    /// Young-family population: under 18.
    #[must_use]
    pub const fn young_family(&self) -> u64 {
        self.under_5 + self.age_5_17
    }
}

/// Age-band populations as percentages of the total population.
///
/// All fields are zero when the total population is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBandPercentages {
    /// Under 5 years.
    pub under_5: f64,
    /// 5 to 17 years.
    pub age_5_17: f64,
    /// 18 to 24 years.
    pub age_18_24: f64,
    /// 25 to 34 years.
    pub age_25_34: f64,
    /// 35 to 44 years.
    pub age_35_44: f64,
    /// 45 to 54 years.
    pub age_45_54: f64,
    /// 55 to 64 years.
    pub age_55_64: f64,
    /// 65 to 74 years.
    pub age_65_74: f64,
    /// 75 to 84 years.
    pub age_75_84: f64,
    /// 85 years and over.
    pub age_85_plus: f64,
}

impl AgeBandPercentages {
    /// Derives percentages from band counts against `total_population`.
    ///
    /// All percentages are zero when `total_population` is zero.
    #[must_use]
    pub fn from_counts(counts: &AgeBandCounts, total_population: u64) -> Self {
        if total_population == 0 {
            return Self::default();
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = |band: u64| band as f64 / total_population as f64 * 100.0;
        Self {
            under_5: pct(counts.under_5),
            age_5_17: pct(counts.age_5_17),
            age_18_24: pct(counts.age_18_24),
            age_25_34: pct(counts.age_25_34),
            age_35_44: pct(counts.age_35_44),
            age_45_54: pct(counts.age_45_54),
            age_55_64: pct(counts.age_55_64),
            age_65_74: pct(counts.age_65_74),
            age_75_84: pct(counts.age_75_84),
            age_85_plus: pct(counts.age_85_plus),
        }
    }

    /// Sum of all ten band percentages.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.under_5
            + self.age_5_17
            + self.age_18_24
            + self.age_25_34
            + self.age_35_44
            + self.age_45_54
            + self.age_55_64
            + self.age_65_74
            + self.age_75_84
            + self.age_85_plus
    }

    /// Senior percentage: 65 and over.
    #[must_use]
    pub fn senior(&self) -> f64 {
        self.age_65_74 + self.age_75_84 + self.age_85_plus
    }

    /// Young-family percentage: under 18.
    #[must_use]
    pub fn young_family(&self) -> f64 {
        self.under_5 + self.age_5_17
    }
}

/// A geographic area (ZIP code or MSA) with derived demographic metrics.
///
/// Constructed once per aggregation pass and immutable afterwards;
/// re-derivable at any time by re-running the aggregator over the raw
/// source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geography {
    /// Identifier: 5-digit zero-padded ZIP code or MSA/CBSA code.
    pub id: String,
    /// Human-readable name, if known.
    pub name: Option<String>,
    /// Total population.
    pub total_population: u64,
    /// Median household income in dollars.
    pub median_household_income: f64,
    /// Median home value in dollars.
    pub median_home_value: f64,
    /// People per square mile.
    pub population_density: f64,
    /// Estimated annual population growth rate in percent.
    pub population_growth_rate: f64,
    /// Population counts per age band.
    pub age_counts: AgeBandCounts,
    /// Age-band percentages of total population.
    pub age_percentages: AgeBandPercentages,
}

impl Geography {
    /// An all-zero record for a geography with no raw demographic source.
    ///
    /// Downstream components always see a complete, well-typed record;
    /// "no data" is expressed as zeros, never as a missing row.
    #[must_use]
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            total_population: 0,
            median_household_income: 0.0,
            median_home_value: 0.0,
            population_density: 0.0,
            population_growth_rate: 0.0,
            age_counts: AgeBandCounts::default(),
            age_percentages: AgeBandPercentages::default(),
        }
    }
}
