use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::model::{WeatherSnapshot, kph_to_mps, round_temp_c, round_wind_mps};

use super::{ProviderId, WeatherProvider, truncate_body};

const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const PROVIDER: &str = "weatherapi";

/// The upstream has no current-conditions temperature range, so min/max are
/// approximated as current ± 2 °C.
const RANGE_SPREAD_C: f64 = 2.0;

/// WeatherAPI.com current-conditions adapter. Wind arrives in km/h.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential { provider: PROVIDER })?;

        let url = format!("{}/current.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("key", api_key), ("q", city)])
            .send()
            .await
            .map_err(|err| ProviderError::from_reqwest(PROVIDER, err))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| ProviderError::from_reqwest(PROVIDER, err))?;

        if !status.is_success() {
            return Err(ProviderError::UpstreamStatus {
                provider: PROVIDER,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: WaResponse =
            serde_json::from_str(&body).map_err(|err| ProviderError::MalformedPayload {
                provider: PROVIDER,
                message: err.to_string(),
            })?;

        Ok(snapshot_from(parsed))
    }
}

fn snapshot_from(parsed: WaResponse) -> WeatherSnapshot {
    let location_name = format!("{}, {}", parsed.location.name, parsed.location.country);

    let icon_ref = if parsed.current.condition.icon.is_empty() {
        String::new()
    } else if parsed.current.condition.icon.starts_with("//") {
        format!("https:{}", parsed.current.condition.icon)
    } else {
        parsed.current.condition.icon.clone()
    };

    WeatherSnapshot {
        provider: PROVIDER.to_string(),
        location_name,
        temperature_c: round_temp_c(parsed.current.temp_c),
        feels_like_c: round_temp_c(parsed.current.feelslike_c),
        temperature_min_c: round_temp_c(parsed.current.temp_c - RANGE_SPREAD_C),
        temperature_max_c: round_temp_c(parsed.current.temp_c + RANGE_SPREAD_C),
        humidity_percent: parsed.current.humidity,
        wind_speed_mps: round_wind_mps(kph_to_mps(parsed.current.wind_kph)),
        condition_summary: parsed.current.condition.text.clone(),
        condition_description: parsed.current.condition.text,
        icon_ref,
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.fetch_current(city).await
    }
}
