//! MSA resolution result types.
//!
//! A [`MsaResolution`] is the outcome of resolving a ZIP code (or a
//! city/state pair, or a free-form address) to a metropolitan statistical
//! area. Resolutions always exist — an unmappable identifier resolves to
//! the [`MsaResolution::unknown`] sentinel rather than an error.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// MSA code used for unresolved geographies.
pub const UNKNOWN_MSA_CODE: &str = "00000";

/// MSA name used for unresolved geographies.
pub const UNKNOWN_MSA_NAME: &str = "Unknown";

/// Which resolution tier produced an [`MsaResolution`].
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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionSource {
    /// Served from the process-local resolution cache.
    Cache,
    /// Resolved by a remote ZIP-to-MSA lookup service.
    RemoteApi,
    /// Resolved from the static fallback tables.
    StaticFallback,
    /// Recovered from a free-form address (ZIP token or city/state split).
    AddressParse,
    /// All tiers failed; sentinel values are in effect.
    Unknown,
}

/// MSA population estimates returned by the remote lookup service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationEstimates {
    /// 2014 MSA population, when the service provides it.
    pub population_2014: Option<u64>,
    /// 2015 MSA population, when the service provides it.
    pub population_2015: Option<u64>,
}

impl PopulationEstimates {
    /// `true` when no estimate is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.population_2014.is_none() && self.population_2015.is_none()
    }
}

/// The result of resolving an identifier to a metropolitan statistical area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsaResolution {
    /// The identifier the lookup was keyed by (normalized ZIP or
    /// `"City, ST"`).
    pub geography_id: String,
    /// MSA name, or [`UNKNOWN_MSA_NAME`].
    pub msa_name: String,
    /// CBSA code, or [`UNKNOWN_MSA_CODE`].
    pub msa_code: String,
    /// Which tier produced this resolution.
    pub source: ResolutionSource,
    /// Population estimates, when the resolving tier provides them.
    pub population_estimates: Option<PopulationEstimates>,
}

impl MsaResolution {
    /// The sentinel resolution for an identifier no tier could map.
    ///
    /// Invariant: `source == Unknown` implies `msa_code == "00000"` and
    /// `msa_name == "Unknown"`; this constructor is the only way an
    /// `Unknown` resolution is built.
    #[must_use]
    pub fn unknown(geography_id: impl Into<String>) -> Self {
        Self {
            geography_id: geography_id.into(),
            msa_name: UNKNOWN_MSA_NAME.to_string(),
            msa_code: UNKNOWN_MSA_CODE.to_string(),
            source: ResolutionSource::Unknown,
            population_estimates: None,
        }
    }

    /// `true` when this is the unknown sentinel.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.source == ResolutionSource::Unknown
    }

    /// A copy of this resolution re-labeled as served from cache.
    ///
    /// The originally recorded source stays in the cache; callers that
    /// care about freshness see [`ResolutionSource::Cache`].
    #[must_use]
    pub fn served_from_cache(&self) -> Self {
        Self {
            source: ResolutionSource::Cache,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sentinel_invariant() {
        let res = MsaResolution::unknown("99999");
        assert!(res.is_unknown());
        assert_eq!(res.msa_code, UNKNOWN_MSA_CODE);
        assert_eq!(res.msa_name, UNKNOWN_MSA_NAME);
        assert!(res.population_estimates.is_none());
    }

    #[test]
    fn cache_relabel_keeps_payload() {
        let res = MsaResolution {
            geography_id: "60601".to_string(),
            msa_name: "Chicago-Naperville-Elgin, IL-IN-WI".to_string(),
            msa_code: "16980".to_string(),
            source: ResolutionSource::RemoteApi,
            population_estimates: None,
        };
        let served = res.served_from_cache();
        assert_eq!(served.source, ResolutionSource::Cache);
        assert_eq!(served.msa_code, res.msa_code);
        assert_eq!(served.msa_name, res.msa_name);
    }

    #[test]
    fn source_round_trips_through_display() {
        assert_eq!(ResolutionSource::RemoteApi.to_string(), "REMOTE_API");
        assert_eq!(
            "STATIC_FALLBACK".parse::<ResolutionSource>().unwrap(),
            ResolutionSource::StaticFallback
        );
    }
}
