use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::cache::CacheConfig;

/// Environment variables holding the keyed-provider credentials.
pub const OPENWEATHER_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const WEATHERAPI_KEY_VAR: &str = "WEATHERAPI_API_KEY";

const CACHE_CAPACITY_VAR: &str = "WEATHER_CACHE_CAPACITY";
const CACHE_TTL_VAR: &str = "WEATHER_CACHE_TTL_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk representation of the optional config file.
///
/// Example TOML:
/// ```toml
/// openweather_api_key = "..."
/// weatherapi_api_key = "..."
/// cache_capacity = 10000
/// cache_ttl_secs = 300
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    openweather_api_key: Option<String>,
    weatherapi_api_key: Option<String>,
    cache_capacity: Option<u64>,
    cache_ttl_secs: Option<u64>,
}

/// Runtime configuration for the lookup service.
///
/// Loaded from an optional TOML file in the platform config directory, with
/// environment variables taking precedence. A missing provider key disables
/// that adapter rather than failing startup.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub openweather_api_key: Option<String>,
    pub weatherapi_api_key: Option<String>,
    pub cache: CacheConfig,
}

impl Config {
    /// Load config from the file (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;

                toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })?
            }
            _ => ConfigFile::default(),
        };

        Ok(Self::from_file_and_env(file))
    }

    /// Load from the environment only, ignoring any config file.
    pub fn from_env() -> Self {
        Self::from_file_and_env(ConfigFile::default())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "weather", "weather-server")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn from_file_and_env(file: ConfigFile) -> Self {
        let defaults = CacheConfig::default();

        let max_capacity = env_u64(CACHE_CAPACITY_VAR)
            .or(file.cache_capacity)
            .unwrap_or(defaults.max_capacity);

        let freshness_window = env_u64(CACHE_TTL_VAR)
            .or(file.cache_ttl_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.freshness_window);

        Self {
            openweather_api_key: env_non_empty(OPENWEATHER_KEY_VAR).or(file.openweather_api_key),
            weatherapi_api_key: env_non_empty(WEATHERAPI_KEY_VAR).or(file.weatherapi_api_key),
            cache: CacheConfig {
                max_capacity,
                freshness_window,
            },
        }
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_u64(var: &str) -> Option<u64> {
    env::var(var).ok().and_then(|value| value.trim().parse().ok())
}
