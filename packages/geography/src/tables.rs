//! Compile-time embedded MSA fallback tables.
//!
//! Three assets under `tables/`:
//!
//! - `zip_msa.toml` — ZIP → `{msa_name, msa_code}` for the known
//!   service area, grouped by MSA.
//! - `city_msa.toml` — (city, state) → MSA name. Name-only: city-level
//!   matches carry no CBSA code.
//! - `cbsa_names.toml` — CBSA code → MSA display name, for remote
//!   services that return a bare code.
//!
//! The tables are parsed once on first access and served from static
//! maps thereafter.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

const ZIP_MSA_TOML: &str = include_str!("../tables/zip_msa.toml");
const CITY_MSA_TOML: &str = include_str!("../tables/city_msa.toml");
const CBSA_NAMES_TOML: &str = include_str!("../tables/cbsa_names.toml");

/// One MSA's entry in the ZIP fallback table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsaEntry {
    /// MSA display name.
    pub msa_name: String,
    /// CBSA code.
    pub msa_code: String,
}

#[derive(Debug, Deserialize)]
struct ZipMsaFile {
    msas: Vec<ZipMsaGroup>,
}

#[derive(Debug, Deserialize)]
struct ZipMsaGroup {
    msa_name: String,
    msa_code: String,
    zips: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CityMsaFile {
    entries: Vec<CityMsaEntry>,
}

#[derive(Debug, Deserialize)]
struct CityMsaEntry {
    city: String,
    state: String,
    msa: String,
}

#[derive(Debug, Deserialize)]
struct CbsaNamesFile {
    names: BTreeMap<String, String>,
}

static ZIP_TABLE: LazyLock<BTreeMap<String, MsaEntry>> = LazyLock::new(|| {
    let file: ZipMsaFile =
        toml::de::from_str(ZIP_MSA_TOML).expect("malformed embedded zip_msa.toml");
    let mut map = BTreeMap::new();
    for group in file.msas {
        for zip in group.zips {
            map.insert(
                zip,
                MsaEntry {
                    msa_name: group.msa_name.clone(),
                    msa_code: group.msa_code.clone(),
                },
            );
        }
    }
    map
});

static CITY_TABLE: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let file: CityMsaFile =
        toml::de::from_str(CITY_MSA_TOML).expect("malformed embedded city_msa.toml");
    file.entries
        .into_iter()
        .map(|e| (city_state_key(&e.city, &e.state), e.msa))
        .collect()
});

static CBSA_NAMES: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let file: CbsaNamesFile =
        toml::de::from_str(CBSA_NAMES_TOML).expect("malformed embedded cbsa_names.toml");
    file.names
});

/// Builds the canonical `"City, ST"` lookup key: title-cased city,
/// upper-cased two-letter state.
#[must_use]
pub fn city_state_key(city: &str, state: &str) -> String {
    format!("{}, {}", title_case(city.trim()), state.trim().to_uppercase())
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks up a normalized 5-digit ZIP in the static fallback table.
#[must_use]
pub fn zip_fallback(zip: &str) -> Option<&'static MsaEntry> {
    ZIP_TABLE.get(zip)
}

/// Looks up a (city, state) pair in the static fallback table.
///
/// Returns the MSA name only; city-level matches carry no CBSA code.
#[must_use]
pub fn city_fallback(city: &str, state: &str) -> Option<&'static str> {
    CITY_TABLE
        .get(&city_state_key(city, state))
        .map(String::as_str)
}

/// Resolves a CBSA code to its MSA display name.
#[must_use]
pub fn cbsa_name(code: &str) -> Option<&'static str> {
    CBSA_NAMES.get(code).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_table_is_populated() {
        assert!(!ZIP_TABLE.is_empty());
    }

    #[test]
    fn chicago_loop_zip_maps_to_chicago_msa() {
        let entry = zip_fallback("60601").unwrap();
        assert_eq!(entry.msa_name, "Chicago-Naperville-Elgin, IL-IN-WI");
        assert_eq!(entry.msa_code, "16980");
    }

    #[test]
    fn rockford_zip_maps_to_rockford_msa() {
        let entry = zip_fallback("61101").unwrap();
        assert_eq!(entry.msa_name, "Rockford, IL");
        assert_eq!(entry.msa_code, "40340");
    }

    #[test]
    fn unknown_zip_misses() {
        assert!(zip_fallback("99999").is_none());
    }

    #[test]
    fn city_lookup_normalizes_case() {
        assert_eq!(
            city_fallback("chicago", "il"),
            Some("Chicago-Naperville-Elgin, IL-IN-WI")
        );
        assert_eq!(
            city_fallback("ROCK ISLAND", "Il"),
            Some("Davenport-Moline-Rock Island, IA-IL")
        );
    }

    #[test]
    fn cbsa_codes_resolve_to_names() {
        assert_eq!(cbsa_name("16980"), Some("Chicago-Naperville-Elgin, IL-IN-WI"));
        assert_eq!(cbsa_name("37900"), Some("Peoria, IL"));
        assert!(cbsa_name("00001").is_none());
    }

    #[test]
    fn zip_codes_in_table_are_five_digits() {
        for zip in ZIP_TABLE.keys() {
            assert_eq!(zip.len(), 5, "bad ZIP key: {zip}");
            assert!(zip.chars().all(|c| c.is_ascii_digit()), "bad ZIP key: {zip}");
        }
    }

    #[test]
    fn every_zip_entry_has_a_known_cbsa_name() {
        for entry in ZIP_TABLE.values() {
            assert_eq!(cbsa_name(&entry.msa_code), Some(entry.msa_name.as_str()));
        }
    }

    #[test]
    fn city_state_key_format() {
        assert_eq!(city_state_key(" east moline ", "il"), "East Moline, IL");
    }
}
