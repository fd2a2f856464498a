use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::model::{WeatherSnapshot, kph_to_mps, round_temp_c, round_wind_mps};

use super::{ProviderId, WeatherProvider, truncate_body};

const DEFAULT_BASE_URL: &str = "https://wttr.in";
// wttr.in is noticeably slower than the keyed providers.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
const PROVIDER: &str = "wttr";

/// Keyless wttr.in adapter, using the `format=j1` JSON endpoint.
///
/// Current-condition fields arrive as single-element arrays of string-typed
/// values; numeric sub-fields are coerced with a default of 0 when missing or
/// unparsable. Min/max temperatures come from the first daily-forecast entry,
/// falling back to the current temperature.
#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
    http: Client,
}

impl WttrProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            http: Client::new(),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        let url = format!("{}/{}", self.base_url, city);

        let res = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("format", "j1")])
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

        let parsed: WttrResponse =
            serde_json::from_str(&body).map_err(|err| ProviderError::MalformedPayload {
                provider: PROVIDER,
                message: err.to_string(),
            })?;

        snapshot_from(parsed, city)
    }
}

impl Default for WttrProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot_from(parsed: WttrResponse, city: &str) -> Result<WeatherSnapshot, ProviderError> {
    let current = parsed
        .current_condition
        .first()
        .ok_or_else(|| ProviderError::MalformedPayload {
            provider: PROVIDER,
            message: "response contained no current_condition entry".to_string(),
        })?;

    let temperature_c = parse_or_zero(&current.temp_c);

    // Daily forecast carries the range; fall back to the current reading.
    let (min_c, max_c) = parsed
        .weather
        .first()
        .map(|day| (parse_or_zero(&day.mintemp_c), parse_or_zero(&day.maxtemp_c)))
        .unwrap_or((temperature_c, temperature_c));

    let description = current
        .weather_desc
        .first()
        .map(|d| d.value.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    let location_name = parsed
        .nearest_area
        .first()
        .and_then(|area| {
            let name = area.area_name.first()?.value.clone();
            let country = area.country.first().map(|c| c.value.clone());
            Some(match country {
                Some(country) if !country.is_empty() => format!("{name}, {country}"),
                _ => name,
            })
        })
        .unwrap_or_else(|| city.to_string());

    Ok(WeatherSnapshot {
        provider: PROVIDER.to_string(),
        location_name,
        temperature_c: round_temp_c(temperature_c),
        feels_like_c: round_temp_c(parse_or_zero(&current.feels_like_c)),
        temperature_min_c: round_temp_c(min_c),
        temperature_max_c: round_temp_c(max_c),
        humidity_percent: parse_or_zero(&current.humidity) as u8,
        wind_speed_mps: round_wind_mps(kph_to_mps(parse_or_zero(&current.windspeed_kmph))),
        condition_summary: description.clone(),
        condition_description: description,
        icon_ref: String::new(),
    })
}

/// Lenient numeric coercion: missing or unparsable values become 0.
fn parse_or_zero(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    weather: Vec<WttrDay>,
    #[serde(default)]
    nearest_area: Vec<WttrArea>,
}

#[derive(Debug, Default, Deserialize)]
struct WttrCurrent {
    #[serde(default, rename = "temp_C")]
    temp_c: String,
    #[serde(default, rename = "FeelsLikeC")]
    feels_like_c: String,
    #[serde(default)]
    humidity: String,
    #[serde(default, rename = "windspeedKmph")]
    windspeed_kmph: String,
    #[serde(default, rename = "weatherDesc")]
    weather_desc: Vec<WttrValue>,
}

#[derive(Debug, Default, Deserialize)]
struct WttrValue {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
struct WttrDay {
    #[serde(default, rename = "mintempC")]
    mintemp_c: String,
    #[serde(default, rename = "maxtempC")]
    maxtemp_c: String,
}

#[derive(Debug, Default, Deserialize)]
struct WttrArea {
    #[serde(default, rename = "areaName")]
    area_name: Vec<WttrValue>,
    #[serde(default)]
    country: Vec<WttrValue>,
}

#[async_trait]
impl WeatherProvider for WttrProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Wttr
    }

    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.fetch_current(city).await
    }
}
