use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::model::{WeatherSnapshot, round_temp_c, round_wind_mps};

use super::{ProviderId, WeatherProvider, truncate_body};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const PROVIDER: &str = "openweather";

/// OpenWeatherMap current-conditions adapter.
///
/// With `units=metric` the upstream reports Celsius directly and wind speed
/// already in m/s; min/max temperatures are native fields.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
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

        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
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

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|err| ProviderError::MalformedPayload {
                provider: PROVIDER,
                message: err.to_string(),
            })?;

        Ok(snapshot_from(parsed))
    }
}

fn snapshot_from(parsed: OwCurrentResponse) -> WeatherSnapshot {
    let (summary, description, icon_ref) = parsed
        .weather
        .first()
        .map(|w| {
            (
                w.main.clone(),
                w.description.clone(),
                format!("https://openweathermap.org/img/wn/{}@2x.png", w.icon),
            )
        })
        .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string(), String::new()));

    WeatherSnapshot {
        provider: PROVIDER.to_string(),
        location_name: parsed.name,
        temperature_c: round_temp_c(parsed.main.temp),
        feels_like_c: round_temp_c(parsed.main.feels_like),
        temperature_min_c: round_temp_c(parsed.main.temp_min),
        temperature_max_c: round_temp_c(parsed.main.temp_max),
        humidity_percent: parsed.main.humidity,
        wind_speed_mps: round_wind_mps(parsed.wind.speed),
        condition_summary: summary,
        condition_description: description,
        icon_ref,
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        self.fetch_current(city).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CURRENT_BODY: &str = r#"{
        "name": "London",
        "main": {
            "temp": 21.42,
            "feels_like": 20.61,
            "temp_min": 18.3,
            "temp_max": 23.9,
            "humidity": 44
        },
        "weather": [
            {"main": "Clouds", "description": "scattered clouds", "icon": "03d"}
        ],
        "wind": {"speed": 3.64}
    }"#;

    fn provider(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::with_base_url(Some("KEY".to_string()), server.uri())
    }

    #[tokio::test]
    async fn maps_metric_fields_directly() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .and(query_param("appid", "KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CURRENT_BODY, "application/json"))
            .mount(&server)
            .await;

        let snapshot = provider(&server).fetch("London").await.expect("success");

        assert_eq!(snapshot.provider, "openweather");
        assert_eq!(snapshot.location_name, "London");
        assert_eq!(snapshot.temperature_c, 21.0);
        assert_eq!(snapshot.feels_like_c, 21.0);
        assert_eq!(snapshot.temperature_min_c, 18.0);
        assert_eq!(snapshot.temperature_max_c, 24.0);
        assert_eq!(snapshot.humidity_percent, 44);
        assert_eq!(snapshot.wind_speed_mps, 3.6);
        assert_eq!(snapshot.condition_summary, "Clouds");
        assert_eq!(snapshot.condition_description, "scattered clouds");
        assert_eq!(
            snapshot.icon_ref,
            "https://openweathermap.org/img/wn/03d@2x.png"
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_without_network_call() {
        // No mock server at all: a network attempt would hang or error
        // differently, so MissingCredential proves the guard fired first.
        let provider =
            OpenWeatherProvider::with_base_url(None, "http://127.0.0.1:9".to_string());

        let err = provider.fetch("London").await.expect_err("must fail");
        assert!(matches!(err, ProviderError::MissingCredential { .. }));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_string("city not found"))
            .mount(&server)
            .await;

        let err = provider(&server).fetch("Nowhere").await.expect_err("404");
        match err {
            ProviderError::UpstreamStatus { status, .. } => assert_eq!(status, 404),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider(&server).fetch("London").await.expect_err("parse");
        assert!(matches!(err, ProviderError::MalformedPayload { .. }));
    }
}
