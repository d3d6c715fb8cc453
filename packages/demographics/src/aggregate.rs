//! Aggregation of raw demographic columns into [`Geography`] records.

use care_map_geography::regional::RegionalEstimates;
use care_map_geography_models::{AgeBandCounts, AgeBandPercentages, Geography};

use crate::acs::{
    self, BAND_CODES, MEDIAN_HOME_VALUE, MEDIAN_HOUSEHOLD_INCOME, RawColumns, TOTAL_POPULATION,
};

/// Reads a named column, defaulting to 0 when absent.
#[must_use]
pub fn column(raw: &RawColumns, name: &str) -> f64 {
    raw.get(name).copied().unwrap_or(0.0)
}

/// Sums a set of columns as a population count.
#[must_use]
pub fn sum_codes(raw: &RawColumns, codes: &[&str]) -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        codes.iter().map(|&code| column(raw, code)).sum::<f64>().round() as u64
    }
}

/// Sums male and female cells into the ten fixed age bands.
#[must_use]
pub fn age_band_counts(raw: &RawColumns) -> AgeBandCounts {
    let band = |i: usize| {
        let codes: &acs::BandCodes = &BAND_CODES[i];
        sum_codes(raw, codes.male) + sum_codes(raw, codes.female)
    };
    AgeBandCounts {
        under_5: band(0),
        age_5_17: band(1),
        age_18_24: band(2),
        age_25_34: band(3),
        age_35_44: band(4),
        age_45_54: band(5),
        age_55_64: band(6),
        age_65_74: band(7),
        age_75_84: band(8),
        age_85_plus: band(9),
    }
}

/// Aggregates raw columns into a complete [`Geography`] record.
///
/// Density divides the reported total population by the ZIP's estimated
/// area; the growth rate comes straight from the regional estimate.
/// With no raw source at all the result is the all-zero
/// [`Geography::empty`] record, growth proxy included.
#[must_use]
pub fn aggregate(zip: &str, raw: &RawColumns, estimates: &dyn RegionalEstimates) -> Geography {
    if raw.is_empty() {
        return Geography::empty(zip);
    }

    let age_counts = age_band_counts(raw);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_population = column(raw, TOTAL_POPULATION).round() as u64;

    let area = estimates.area_sq_mi(zip);
    #[allow(clippy::cast_precision_loss)]
    let population_density = if area > 0.0 {
        total_population as f64 / area
    } else {
        0.0
    };

    Geography {
        id: zip.to_string(),
        name: None,
        total_population,
        median_household_income: column(raw, MEDIAN_HOUSEHOLD_INCOME),
        median_home_value: column(raw, MEDIAN_HOME_VALUE),
        population_density,
        population_growth_rate: estimates.growth_rate_pct(zip),
        age_percentages: AgeBandPercentages::from_counts(&age_counts, total_population),
        age_counts,
    }
}

/// Growth-rate estimates broken down by age group, derived from the
/// base regional rate with fixed multipliers (seniors migrate toward
/// care the fastest, prime-age adults toward jobs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthByAgeGroup {
    /// Under 18.
    pub under_18: f64,
    /// 18 to 34.
    pub age_18_34: f64,
    /// 35 to 54.
    pub age_35_54: f64,
    /// 55 to 64.
    pub age_55_64: f64,
    /// 65 and over.
    pub age_65_plus: f64,
}

impl GrowthByAgeGroup {
    /// Derives per-group rates from the base annual rate.
    #[must_use]
    pub fn from_base_rate(base: f64) -> Self {
        Self {
            under_18: base * 0.8,
            age_18_34: base * 1.2,
            age_35_54: base * 0.9,
            age_55_64: base * 1.1,
            age_65_plus: base * 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use care_map_geography::regional::PrefixTables;

    fn raw_with(columns: &[(&str, f64)]) -> RawColumns {
        columns
            .iter()
            .map(|(name, value)| ((*name).to_string(), *value))
            .collect()
    }

    #[test]
    fn missing_columns_read_as_zero() {
        let raw = RawColumns::new();
        assert!((column(&raw, TOTAL_POPULATION) - 0.0).abs() < f64::EPSILON);
        assert_eq!(sum_codes(&raw, &["B01001_003E", "B01001_027E"]), 0);
    }

    #[test]
    fn bands_sum_male_and_female_cells() {
        let raw = raw_with(&[
            ("B01001_003E", 120.0), // male under 5
            ("B01001_027E", 110.0), // female under 5
            ("B01001_025E", 30.0),  // male 85+
            ("B01001_049E", 50.0),  // female 85+
        ]);
        let counts = age_band_counts(&raw);
        assert_eq!(counts.under_5, 230);
        assert_eq!(counts.age_85_plus, 80);
        assert_eq!(counts.age_25_34, 0);
    }

    #[test]
    fn aggregates_a_chicago_zip() {
        let raw = raw_with(&[
            (TOTAL_POPULATION, 15000.0),
            (MEDIAN_HOUSEHOLD_INCOME, 68000.0),
            (MEDIAN_HOME_VALUE, 310_000.0),
            ("B01001_003E", 400.0),
            ("B01001_027E", 380.0),
        ]);
        let geo = aggregate("60601", &raw, &PrefixTables);

        assert_eq!(geo.id, "60601");
        assert_eq!(geo.total_population, 15000);
        assert!((geo.median_household_income - 68000.0).abs() < f64::EPSILON);
        // 15,000 people over the 75 sq mi prefix estimate
        assert!((geo.population_density - 200.0).abs() < 1e-9);
        assert!((geo.population_growth_rate - 0.2).abs() < f64::EPSILON);
        assert_eq!(geo.age_counts.under_5, 780);
        assert!(geo.age_percentages.under_5 > 5.0);
    }

    #[test]
    fn percentages_sum_near_100_when_bands_cover_total() {
        let raw = raw_with(&[
            (TOTAL_POPULATION, 1000.0),
            ("B01001_003E", 100.0),
            ("B01001_004E", 150.0),
            ("B01001_007E", 100.0),
            ("B01001_011E", 150.0),
            ("B01001_013E", 100.0),
            ("B01001_015E", 100.0),
            ("B01001_017E", 100.0),
            ("B01001_020E", 100.0),
            ("B01001_023E", 60.0),
            ("B01001_025E", 40.0),
        ]);
        let geo = aggregate("60601", &raw, &PrefixTables);
        assert!((geo.age_percentages.sum() - 100.0).abs() < 0.5);
    }

    #[test]
    fn zero_population_yields_zero_percentages_and_density() {
        let raw = raw_with(&[(MEDIAN_HOUSEHOLD_INCOME, 52000.0)]);
        let geo = aggregate("73101", &raw, &PrefixTables);
        assert_eq!(geo.total_population, 0);
        assert!((geo.population_density - 0.0).abs() < f64::EPSILON);
        assert!((geo.age_percentages.sum() - 0.0).abs() < f64::EPSILON);
        // Growth is a regional estimate, present even with no population.
        assert!((geo.population_growth_rate - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn absent_raw_source_yields_the_empty_record() {
        let geo = aggregate("80202", &RawColumns::new(), &PrefixTables);
        assert_eq!(geo, Geography::empty("80202"));
        assert!((geo.population_growth_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn growth_multipliers_scale_the_base_rate() {
        let growth = GrowthByAgeGroup::from_base_rate(1.0);
        assert!((growth.under_18 - 0.8).abs() < f64::EPSILON);
        assert!((growth.age_18_34 - 1.2).abs() < f64::EPSILON);
        assert!((growth.age_35_54 - 0.9).abs() < f64::EPSILON);
        assert!((growth.age_55_64 - 1.1).abs() < f64::EPSILON);
        assert!((growth.age_65_plus - 1.5).abs() < f64::EPSILON);
    }
}
