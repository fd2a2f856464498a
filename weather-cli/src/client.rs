use reqwest::{Client, StatusCode};

use weather_core::WeatherSnapshot;

/// HTTP client for the lookup endpoint.
///
/// Every failure becomes a single human-readable message; callers never see
/// transport or upstream details.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_weather(&self, city: &str) -> Result<WeatherSnapshot, String> {
        let url = format!("{}/weather", self.base_url);

        let res = match self.http.get(&url).query(&[("city", city)]).send().await {
            Ok(res) => res,
            Err(_) => {
                return Err(format!(
                    "Could not reach the weather service at {}.",
                    self.base_url
                ));
            }
        };

        let status = res.status();
        if status.is_success() {
            return res
                .json::<WeatherSnapshot>()
                .await
                .map_err(|_| "The weather service returned an unreadable response.".to_string());
        }

        let body = res.text().await.unwrap_or_default();
        Err(error_message(status, &body))
    }
}

/// One human-readable line for any non-200 response. Prefers the server's
/// own error message when the body carries one.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = parsed.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }

    match status {
        StatusCode::BAD_REQUEST => "Please enter a city name.".to_string(),
        StatusCode::SERVICE_UNAVAILABLE => {
            "Weather is currently unavailable, please try again later.".to_string()
        }
        _ => "Something went wrong while looking up the weather.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SNAPSHOT_BODY: &str = r#"{
        "provider": "openweather",
        "location_name": "London",
        "temperature_c": 21.0,
        "feels_like_c": 20.0,
        "temperature_min_c": 18.0,
        "temperature_max_c": 24.0,
        "humidity_percent": 44,
        "wind_speed_mps": 3.6,
        "condition_summary": "Clouds",
        "condition_description": "scattered clouds",
        "icon_ref": ""
    }"#;

    #[tokio::test]
    async fn success_response_decodes_into_a_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("city", "London"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(SNAPSHOT_BODY, "application/json"),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let snapshot = client.get_weather("London").await.expect("snapshot");
        assert_eq!(snapshot.location_name, "London");
        assert_eq!(snapshot.temperature_c, 21.0);
    }

    #[tokio::test]
    async fn server_error_message_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_raw(r#"{"error":"query parameter 'city' must not be empty"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let message = client.get_weather("").await.expect_err("error");
        assert_eq!(message, "query parameter 'city' must not be empty");
    }

    #[tokio::test]
    async fn bodyless_failure_falls_back_to_a_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let message = client.get_weather("London").await.expect_err("error");
        assert_eq!(
            message,
            "Weather is currently unavailable, please try again later."
        );
    }

    #[tokio::test]
    async fn unreadable_success_body_is_one_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let message = client.get_weather("London").await.expect_err("error");
        assert_eq!(message, "The weather service returned an unreadable response.");
    }

    #[test]
    fn unknown_statuses_get_the_generic_message() {
        let message = error_message(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(message, "Something went wrong while looking up the weather.");
    }
}
