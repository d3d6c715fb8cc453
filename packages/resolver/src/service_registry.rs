//! Compile-time registry of remote MSA lookup service configurations.
//!
//! Each lookup service is defined in a TOML file under `services/`.
//! The registry embeds these at compile time and exposes them via
//! [`all_services`] and [`enabled_services`].

use serde::Deserialize;

/// A remote MSA lookup service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupService {
    /// Unique identifier (e.g., `"zip_to_msa"`, `"hud"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this service is active in the resolution pipeline.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Execution order — lower values run first.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// The public ZIP-to-MSA API (no key required).
    ZipToMsa {
        /// Alternate endpoints for the same service, tried once each in
        /// order.
        base_urls: Vec<String>,
        /// Per-request timeout in seconds.
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    /// HUD USPS ZIP crosswalk (bearer-token authenticated).
    HudCrosswalk {
        /// API base URL.
        base_url: String,
        /// Per-request timeout in seconds.
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
}

const fn default_true() -> bool {
    true
}

const fn default_timeout() -> u64 {
    10
}

impl LookupService {
    /// Returns the per-request timeout for this service.
    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        match &self.provider {
            ProviderConfig::ZipToMsa { timeout_secs, .. }
            | ProviderConfig::HudCrosswalk { timeout_secs, .. } => *timeout_secs,
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("zip_to_msa", include_str!("../services/zip_to_msa.toml")),
    ("hud", include_str!("../services/hud.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all lookup service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time
/// guarantee since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<LookupService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse lookup service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<LookupService> {
    let mut services: Vec<LookupService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_services() {
        let services = all_services();
        assert_eq!(services.len(), EXPECTED_SERVICE_COUNT);
    }

    #[test]
    fn service_ids_are_unique() {
        let services = all_services();
        let mut seen = BTreeSet::new();
        for svc in &services {
            assert!(seen.insert(&svc.id), "Duplicate service ID: {}", svc.id);
        }
    }

    #[test]
    fn all_services_have_required_fields() {
        for svc in &all_services() {
            assert!(!svc.id.is_empty(), "Service has empty id");
            assert!(!svc.name.is_empty(), "Service {} has empty name", svc.id);
            assert!(svc.timeout_secs() > 0, "Service {} has zero timeout", svc.id);
            match &svc.provider {
                ProviderConfig::ZipToMsa { base_urls, .. } => {
                    assert!(!base_urls.is_empty(), "Service {} has no endpoints", svc.id);
                }
                ProviderConfig::HudCrosswalk { base_url, .. } => {
                    assert!(!base_url.is_empty(), "Service {} has empty base_url", svc.id);
                }
            }
        }
    }

    #[test]
    fn enabled_services_sorted_by_priority() {
        let services = enabled_services();
        for window in services.windows(2) {
            assert!(
                window[0].priority <= window[1].priority,
                "Services not sorted by priority: {} ({}) > {} ({})",
                window[0].id,
                window[0].priority,
                window[1].id,
                window[1].priority
            );
        }
    }

    #[test]
    fn hud_requires_a_key_and_ships_disabled() {
        let hud = all_services().into_iter().find(|s| s.id == "hud").unwrap();
        assert!(!hud.enabled);
    }
}
