use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::model::WeatherSnapshot;

/// Tuning for the snapshot cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached cities before eviction kicks in.
    pub max_capacity: u64,
    /// How long a cached snapshot is served without refetching.
    pub freshness_window: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            freshness_window: Duration::from_secs(300),
        }
    }
}

/// A snapshot plus the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub snapshot: WeatherSnapshot,
    pub fetched_at_epoch_ms: i64,
}

/// Bounded in-memory snapshot cache, keyed by normalized city name.
///
/// Entries expire after the freshness window and total capacity is fixed, so
/// a long-running process querying many distinct cities cannot grow without
/// bound. Concurrent misses for the same key share a single fetch.
#[derive(Debug)]
pub struct SnapshotCache {
    inner: MokaCache<String, CachedSnapshot>,
}

impl SnapshotCache {
    pub fn new(config: &CacheConfig) -> Self {
        let inner = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.freshness_window)
            .build();

        Self { inner }
    }

    /// Normalized cache key for a city name.
    pub fn key_for(city: &str) -> String {
        city.trim().to_lowercase()
    }

    pub async fn get(&self, key: &str) -> Option<CachedSnapshot> {
        self.inner.get(key).await
    }

    /// Return the fresh entry for `key`, or resolve `init` and cache its
    /// result. Concurrent callers for the same key share one `init` run; a
    /// failed `init` caches nothing, so a failure never poisons the key.
    pub async fn get_or_try_fetch<F, E>(
        &self,
        key: String,
        init: F,
    ) -> Result<CachedSnapshot, Arc<E>>
    where
        F: Future<Output = Result<CachedSnapshot, E>>,
        E: Send + Sync + 'static,
    {
        self.inner.try_get_with(key, init).await
    }
}
