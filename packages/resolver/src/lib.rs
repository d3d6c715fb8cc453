#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! ZIP-to-MSA resolution for care map data.
//!
//! Resolves a ZIP code, a (city, state) pair, or a free-form address to
//! a metropolitan statistical area through a layered fallback chain:
//!
//! 1. **Cache** — process-local, keyed by normalized ZIP or `"City, ST"`.
//! 2. **Remote lookup services** — configured via TOML files in
//!    `services/`, tried in priority order, one attempt each with a
//!    bounded timeout.
//! 3. **Static fallback tables** — the known service area shipped with
//!    [`care_map_geography`].
//! 4. **Address parsing** — recover a ZIP token or city/state from a
//!    one-line address and re-enter the chain.
//!
//! [`MsaResolver::resolve`] never fails: every tier failure degrades to
//! the next tier and terminates at the `Unknown` sentinel, so callers of
//! this best-effort enrichment pipeline always get a usable value. Tier
//! internals still return typed [`ResolveError`]s, which the orchestrator
//! logs before falling through — failures are visible, just not fatal.

pub mod address;
pub mod cache;
pub mod remote;
pub mod service_registry;

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use care_map_geography::tables;
use care_map_geography_models::normalize_zip;
use care_map_geography_models::resolution::{MsaResolution, ResolutionSource};

pub use crate::cache::ResolutionCache;
use crate::service_registry::LookupService;

/// Errors from a single resolution tier.
///
/// These never escape [`MsaResolver::resolve`]; the orchestrator logs
/// them and falls through to the next tier.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// HTTP request failed (connection error, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote service answered with a non-success status.
    #[error("HTTP status {code}")]
    Status {
        /// The status code returned.
        code: u16,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// An identifier to resolve: a ZIP code, a city/state pair, or a
/// free-form one-line address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveRequest {
    /// A raw ZIP code (normalized before lookup).
    Zip(String),
    /// A city name and two-letter state.
    CityState {
        /// City name, any casing.
        city: String,
        /// Two-letter state abbreviation.
        state: String,
    },
    /// A free-form address to recover a ZIP or city/state from.
    Address(String),
}

/// Resolves identifiers to metropolitan statistical areas.
///
/// Construct with an explicit [`ResolutionCache`]; the cache is shared
/// by all clones of it, so a batch pipeline can hand the same cache to
/// several resolvers (or resolve distinct identifiers concurrently).
pub struct MsaResolver {
    client: reqwest::Client,
    cache: ResolutionCache,
    services: Vec<LookupService>,
    /// Set once every configured service has failed for a lookup;
    /// later lookups skip straight to the static tier.
    remote_down: AtomicBool,
}

impl MsaResolver {
    /// Creates a resolver using the enabled services from the registry.
    #[must_use]
    pub fn new(cache: ResolutionCache) -> Self {
        Self::with_services(cache, service_registry::enabled_services())
    }

    /// Creates a resolver with an explicit service list (primarily for
    /// tests; an empty list disables the remote tier).
    #[must_use]
    pub fn with_services(cache: ResolutionCache, services: Vec<LookupService>) -> Self {
        Self {
            client: reqwest::Client::new(),
            cache,
            services,
            remote_down: AtomicBool::new(false),
        }
    }

    /// `true` while the remote tier is still considered reachable.
    #[must_use]
    pub fn remote_available(&self) -> bool {
        !self.services.is_empty() && !self.remote_down.load(Ordering::Relaxed)
    }

    /// Resolves one identifier. Never fails; unmappable identifiers
    /// resolve to the [`MsaResolution::unknown`] sentinel.
    pub async fn resolve(&self, request: &ResolveRequest) -> MsaResolution {
        match request {
            ResolveRequest::Zip(raw) => match normalize_zip(raw) {
                Some(zip) => self.resolve_zip(&zip).await,
                None => {
                    log::debug!("unparseable ZIP {raw:?}");
                    MsaResolution::unknown(raw.clone())
                }
            },
            ResolveRequest::CityState { city, state } => {
                self.resolve_city_state(city, state)
            }
            ResolveRequest::Address(addr) => self.resolve_address(addr).await,
        }
    }

    /// Resolves a batch sequentially. Callers should budget for a
    /// worst case of `N × timeout` when the remote tier is slow.
    pub async fn resolve_batch(&self, requests: &[ResolveRequest]) -> Vec<MsaResolution> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            results.push(self.resolve(request).await);
        }
        results
    }

    async fn resolve_zip(&self, zip: &str) -> MsaResolution {
        if let Some(hit) = self.cache.get(zip) {
            return hit.served_from_cache();
        }

        if let Some(resolution) = self.remote_lookup(zip).await {
            self.cache.insert(zip, resolution.clone());
            return resolution;
        }

        if let Some(entry) = tables::zip_fallback(zip) {
            let resolution = MsaResolution {
                geography_id: zip.to_string(),
                msa_name: entry.msa_name.clone(),
                msa_code: entry.msa_code.clone(),
                source: ResolutionSource::StaticFallback,
                population_estimates: None,
            };
            self.cache.insert(zip, resolution.clone());
            return resolution;
        }

        // Unknowns are not cached: a later lookup may succeed once the
        // remote tier recovers.
        MsaResolution::unknown(zip)
    }

    fn resolve_city_state(&self, city: &str, state: &str) -> MsaResolution {
        let key = tables::city_state_key(city, state);

        if let Some(hit) = self.cache.get(&key) {
            return hit.served_from_cache();
        }

        // The remote services are ZIP-keyed; city/state lookups go
        // straight to the static tier.
        if let Some(msa_name) = tables::city_fallback(city, state) {
            let resolution = MsaResolution {
                geography_id: key.clone(),
                msa_name: msa_name.to_string(),
                msa_code: "00000".to_string(),
                source: ResolutionSource::StaticFallback,
                population_estimates: None,
            };
            self.cache.insert(key, resolution.clone());
            return resolution;
        }

        MsaResolution::unknown(key)
    }

    async fn resolve_address(&self, addr: &str) -> MsaResolution {
        if let Some(zip) = address::extract_zip(addr) {
            if let Some(zip) = normalize_zip(&zip) {
                return relabel_parsed(self.resolve_zip(&zip).await);
            }
        }

        if let Some((city, state)) = address::extract_city_state(addr) {
            return relabel_parsed(self.resolve_city_state(&city, &state));
        }

        log::debug!("no ZIP or city/state recoverable from address {addr:?}");
        MsaResolution::unknown(addr)
    }

    /// Runs the remote tier: each enabled service in priority order,
    /// one attempt per endpoint. Failures are logged and swallowed; if
    /// every service errors the remote tier latches off for the rest of
    /// the process.
    async fn remote_lookup(&self, zip: &str) -> Option<MsaResolution> {
        if self.services.is_empty() || self.remote_down.load(Ordering::Relaxed) {
            return None;
        }

        let mut errors = 0_usize;
        for service in &self.services {
            match remote::lookup_zip(&self.client, service, zip).await {
                Ok(Some(found)) => {
                    return Some(MsaResolution {
                        geography_id: zip.to_string(),
                        msa_name: found.msa_name,
                        msa_code: found.msa_code,
                        source: ResolutionSource::RemoteApi,
                        population_estimates: found.population_estimates,
                    });
                }
                Ok(None) => {
                    log::debug!("service {} has no MSA for ZIP {zip}", service.id);
                }
                Err(e) => {
                    log::warn!("service {} failed for ZIP {zip}: {e}", service.id);
                    errors += 1;
                }
            }
        }

        if errors == self.services.len() {
            log::warn!("all remote MSA services failed; using static fallback from now on");
            self.remote_down.store(true, Ordering::Relaxed);
        }
        None
    }
}

/// Re-labels a resolution recovered through address parsing. Cache hits
/// and the unknown sentinel keep their own labels.
fn relabel_parsed(resolution: MsaResolution) -> MsaResolution {
    match resolution.source {
        ResolutionSource::RemoteApi | ResolutionSource::StaticFallback => MsaResolution {
            source: ResolutionSource::AddressParse,
            ..resolution
        },
        _ => resolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service_registry::ProviderConfig;

    fn offline_resolver() -> MsaResolver {
        MsaResolver::with_services(ResolutionCache::new(), Vec::new())
    }

    /// A service whose endpoint always refuses connections, for
    /// exercising the degrade path without touching the network.
    fn unreachable_service() -> LookupService {
        LookupService {
            id: "unreachable".to_string(),
            name: "Unreachable".to_string(),
            enabled: true,
            priority: 1,
            provider: ProviderConfig::ZipToMsa {
                base_urls: vec!["http://127.0.0.1:1".to_string()],
                timeout_secs: 1,
            },
        }
    }

    #[tokio::test]
    async fn static_fallback_wins_when_remote_fails() {
        let resolver =
            MsaResolver::with_services(ResolutionCache::new(), vec![unreachable_service()]);
        let resolution = resolver
            .resolve(&ResolveRequest::Zip("60601".to_string()))
            .await;
        assert_eq!(resolution.source, ResolutionSource::StaticFallback);
        assert_eq!(resolution.msa_code, "16980");
    }

    #[tokio::test]
    async fn remote_tier_latches_off_after_total_failure() {
        let resolver =
            MsaResolver::with_services(ResolutionCache::new(), vec![unreachable_service()]);
        assert!(resolver.remote_available());
        resolver
            .resolve(&ResolveRequest::Zip("60601".to_string()))
            .await;
        assert!(!resolver.remote_available());
    }

    #[tokio::test]
    async fn second_resolve_is_served_from_cache() {
        let cache = ResolutionCache::new();
        let resolver = MsaResolver::with_services(cache.clone(), Vec::new());

        let first = resolver
            .resolve(&ResolveRequest::Zip("61101".to_string()))
            .await;
        assert_eq!(first.source, ResolutionSource::StaticFallback);
        assert_eq!(cache.len(), 1);

        let second = resolver
            .resolve(&ResolveRequest::Zip("61101".to_string()))
            .await;
        assert_eq!(second.source, ResolutionSource::Cache);
        assert_eq!(second.msa_name, first.msa_name);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn unknown_zip_is_sentinel_and_not_cached() {
        let cache = ResolutionCache::new();
        let resolver = MsaResolver::with_services(cache.clone(), Vec::new());

        let resolution = resolver
            .resolve(&ResolveRequest::Zip("99999".to_string()))
            .await;
        assert!(resolution.is_unknown());
        assert_eq!(resolution.msa_code, "00000");
        assert_eq!(resolution.msa_name, "Unknown");
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn malformed_zip_resolves_to_unknown() {
        let resolver = offline_resolver();
        let resolution = resolver
            .resolve(&ResolveRequest::Zip("60601-1234".to_string()))
            .await;
        assert!(resolution.is_unknown());
    }

    #[tokio::test]
    async fn short_zip_is_zero_padded_before_lookup() {
        let cache = ResolutionCache::new();
        let resolver = MsaResolver::with_services(cache.clone(), Vec::new());
        resolver
            .resolve(&ResolveRequest::Zip("60601".to_string()))
            .await;
        // Same ZIP with noise hits the same cache entry.
        let resolution = resolver
            .resolve(&ResolveRequest::Zip(" 60601 ".to_string()))
            .await;
        assert_eq!(resolution.source, ResolutionSource::Cache);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn city_state_resolves_from_static_table() {
        let resolver = offline_resolver();
        let resolution = resolver
            .resolve(&ResolveRequest::CityState {
                city: "peoria".to_string(),
                state: "il".to_string(),
            })
            .await;
        assert_eq!(resolution.source, ResolutionSource::StaticFallback);
        assert_eq!(resolution.msa_name, "Peoria, IL");
        assert_eq!(resolution.geography_id, "Peoria, IL");
    }

    #[tokio::test]
    async fn unknown_city_is_sentinel() {
        let resolver = offline_resolver();
        let resolution = resolver
            .resolve(&ResolveRequest::CityState {
                city: "Gotham".to_string(),
                state: "NJ".to_string(),
            })
            .await;
        assert!(resolution.is_unknown());
    }

    #[tokio::test]
    async fn address_with_zip_token_resolves_as_address_parse() {
        let resolver = offline_resolver();
        let resolution = resolver
            .resolve(&ResolveRequest::Address(
                "800 E Carpenter St, Springfield, IL 62701".to_string(),
            ))
            .await;
        assert_eq!(resolution.source, ResolutionSource::AddressParse);
        assert_eq!(resolution.msa_name, "Springfield, IL");
    }

    #[tokio::test]
    async fn address_without_zip_falls_back_to_city_state() {
        let resolver = offline_resolver();
        let resolution = resolver
            .resolve(&ResolveRequest::Address(
                "1 Hospital Dr, Rockford, IL".to_string(),
            ))
            .await;
        assert_eq!(resolution.source, ResolutionSource::AddressParse);
        assert_eq!(resolution.msa_name, "Rockford, IL");
    }

    #[tokio::test]
    async fn hopeless_address_is_sentinel() {
        let resolver = offline_resolver();
        let resolution = resolver
            .resolve(&ResolveRequest::Address("N/A".to_string()))
            .await;
        assert!(resolution.is_unknown());
    }

    #[tokio::test]
    async fn batch_preserves_order() {
        let resolver = offline_resolver();
        let results = resolver
            .resolve_batch(&[
                ResolveRequest::Zip("60601".to_string()),
                ResolveRequest::Zip("99999".to_string()),
                ResolveRequest::Zip("61101".to_string()),
            ])
            .await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].msa_code, "16980");
        assert!(results[1].is_unknown());
        assert_eq!(results[2].msa_code, "40340");
    }
}
