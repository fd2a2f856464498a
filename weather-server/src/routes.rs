use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::error;

use weather_core::{LookupError, WeatherSnapshot};

use crate::{error::ApiError, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/health", get(health_check))
        .route("/live", get(live_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    /// Missing parameter is treated the same as an empty city.
    #[serde(default)]
    city: String,
}

async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<WeatherSnapshot>, ApiError> {
    match state.service.get_weather(&query.city).await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(err) => {
            if let LookupError::Unexpected(detail) = &err {
                error!(%detail, "unexpected failure during lookup");
            }
            Err(ApiError::from(err))
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Simple health check - returns 200 if the service is running.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe.
async fn live_check() -> StatusCode {
    StatusCode::OK
}
