use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    Config,
    error::ProviderError,
    model::WeatherSnapshot,
    provider::{
        openweather::OpenWeatherProvider, weatherapi::WeatherApiProvider, wttr::WttrProvider,
    },
};

pub mod openweather;
pub mod weatherapi;
pub mod wttr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    WeatherApi,
    Wttr,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::WeatherApi => "weatherapi",
            ProviderId::Wttr => "wttr",
        }
    }

    /// All providers, in fallback priority order.
    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::WeatherApi, ProviderId::Wttr]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upstream weather API, translated into the internal snapshot shape.
///
/// `fetch` fails with a [`ProviderError`] on a missing credential, a non-2xx
/// response, a timeout, or a payload missing fields the adapter cannot
/// substitute with a documented default.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, ProviderError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(id: ProviderId, config: &Config) -> Box<dyn WeatherProvider> {
    match id {
        ProviderId::OpenWeather => {
            Box::new(OpenWeatherProvider::new(config.openweather_api_key.clone()))
        }
        ProviderId::WeatherApi => {
            Box::new(WeatherApiProvider::new(config.weatherapi_api_key.clone()))
        }
        ProviderId::Wttr => Box::new(WttrProvider::new()),
    }
}

/// The full fallback chain in priority order.
pub fn provider_chain(config: &Config) -> Vec<Box<dyn WeatherProvider>> {
    ProviderId::all()
        .iter()
        .map(|id| provider_from_config(*id, config))
        .collect()
}

/// Truncate an upstream error body for logging.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
