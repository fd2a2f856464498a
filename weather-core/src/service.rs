use chrono::Utc;
use tracing::{info, warn};

use crate::{
    cache::{CacheConfig, CachedSnapshot, SnapshotCache},
    config::Config,
    error::LookupError,
    model::WeatherSnapshot,
    provider::{WeatherProvider, provider_chain},
};

/// Cache-then-fallback weather lookup.
///
/// Owns its provider chain and cache as explicit state; construct one per
/// process and share it behind an `Arc`.
#[derive(Debug)]
pub struct LookupService {
    providers: Vec<Box<dyn WeatherProvider>>,
    cache: SnapshotCache,
}

impl LookupService {
    pub fn new(providers: Vec<Box<dyn WeatherProvider>>, cache_config: &CacheConfig) -> Self {
        Self {
            providers,
            cache: SnapshotCache::new(cache_config),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(provider_chain(config), &config.cache)
    }

    /// Look up current conditions for `city`.
    ///
    /// Serves from cache within the freshness window; otherwise walks the
    /// provider chain in priority order, caches the first success, and
    /// reports a single unified error if every provider fails. Concurrent
    /// lookups for the same normalized city share one provider fetch.
    pub async fn get_weather(&self, city: &str) -> Result<WeatherSnapshot, LookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LookupError::InvalidInput);
        }

        let key = SnapshotCache::key_for(city);
        let entry = self
            .cache
            .get_or_try_fetch(key, self.fetch_from_providers(city))
            .await
            .map_err(|err| (*err).clone())?;

        Ok(entry.snapshot)
    }

    async fn fetch_from_providers(&self, city: &str) -> Result<CachedSnapshot, LookupError> {
        for provider in &self.providers {
            match provider.fetch(city).await {
                Ok(snapshot) => {
                    info!(provider = %provider.id(), city, "provider answered");
                    return Ok(CachedSnapshot {
                        snapshot,
                        fetched_at_epoch_ms: Utc::now().timestamp_millis(),
                    });
                }
                Err(err) => {
                    warn!(provider = %provider.id(), city, error = %err, "provider failed, trying next");
                }
            }
        }

        Err(LookupError::AllProvidersUnavailable)
    }
}
