//! Process-local resolution cache.
//!
//! The cache is an explicit object handed to the resolver at
//! construction time rather than implicit process-wide state, so test
//! suites inject a fresh cache per test and concurrent batch resolution
//! across distinct identifiers stays safe.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use care_map_geography_models::resolution::MsaResolution;

/// Concurrency-safe map from lookup key (normalized ZIP or
/// `"City, ST"`) to the resolution originally recorded for it.
///
/// Cloning is cheap and shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    inner: Arc<RwLock<BTreeMap<String, MsaResolution>>>,
}

impl ResolutionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached resolution for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<MsaResolution> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Records a resolution under `key`, replacing any earlier entry.
    pub fn insert(&self, key: impl Into<String>, resolution: MsaResolution) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), resolution);
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// `true` when nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
