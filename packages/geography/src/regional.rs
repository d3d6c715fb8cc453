//! Coarse regional estimates keyed by ZIP-prefix range.
//!
//! ZIP land area and population growth are approximated from the first
//! two digits of the ZIP code — a deliberately coarse regional proxy,
//! not measured polygon area or observed historical data. The
//! [`RegionalEstimates`] trait keeps the strategy pluggable so a caller
//! with real boundary or time-series data can substitute it; the
//! [`PrefixTables`] default reproduces the reference constants.

/// Source of area and growth estimates for a ZIP code.
pub trait RegionalEstimates: Send + Sync {
    /// Approximate land area of the ZIP in square miles.
    fn area_sq_mi(&self, zip: &str) -> f64;

    /// Estimated annual population growth rate in percent.
    fn growth_rate_pct(&self, zip: &str) -> f64;
}

/// Default estimates from fixed ZIP-prefix range tables.
///
/// Rural prefixes get larger areas, urban ones smaller; growth rates
/// reflect broad regional trends (slow Midwest, fast Mountain West).
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixTables;

/// Area returned when the ZIP prefix cannot be read.
const DEFAULT_AREA_SQ_MI: f64 = 50.0;

/// Growth rate returned when no regional entry matches.
const DEFAULT_GROWTH_PCT: f64 = 0.8;

fn prefix(zip: &str) -> Option<u8> {
    let two: String = zip.chars().take(2).collect();
    if two.len() == 2 && two.chars().all(|c| c.is_ascii_digit()) {
        two.parse().ok()
    } else {
        None
    }
}

impl RegionalEstimates for PrefixTables {
    fn area_sq_mi(&self, zip: &str) -> f64 {
        let Some(p) = prefix(zip) else {
            return DEFAULT_AREA_SQ_MI;
        };
        match p {
            0..=5 => 15.0,
            6..=9 => 20.0,
            10..=14 => 25.0,
            15..=19 => 30.0,
            20..=27 => 35.0,
            28..=29 => 40.0,
            30..=34 => 45.0,
            35..=39 => 50.0,
            40..=47 => 55.0,
            48..=49 => 60.0,
            50..=57 => 65.0,
            58..=59 => 70.0,
            60..=66 => 75.0,
            67..=69 => 80.0,
            70..=74 => 85.0,
            75..=79 => 90.0,
            80..=87 => 95.0,
            88..=89 => 100.0,
            _ => 110.0,
        }
    }

    fn growth_rate_pct(&self, zip: &str) -> f64 {
        let Some(p) = prefix(zip) else {
            return DEFAULT_GROWTH_PCT;
        };
        match p {
            // NYC area: slower growth
            10..=14 => 0.8,
            // Wisconsin and the upper Midwest
            53..=57 => 0.5,
            // Illinois: very slow growth
            60..=66 => 0.2,
            // Oklahoma
            73..=74 => 1.2,
            // Mountain West: high growth
            80..=87 => 2.0,
            // West Coast
            90..=99 => 1.5,
            _ => DEFAULT_GROWTH_PCT,
        }
    }
}
