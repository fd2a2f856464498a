//! Core library for the weather lookup service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over weather providers and the fallback chain
//! - The bounded snapshot cache and the lookup service built on both
//! - Shared domain models
//!
//! It is used by `weather-server` and `weather-cli`, but can also be reused
//! by other binaries or services.

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use cache::{CacheConfig, CachedSnapshot, SnapshotCache};
pub use config::Config;
pub use error::{LookupError, ProviderError};
pub use model::WeatherSnapshot;
pub use provider::{ProviderId, WeatherProvider};
pub use service::LookupService;
