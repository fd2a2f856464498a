//! Binary crate for the weather HTTP service.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use weather_core::{Config, LookupService};
use weather_server::{logging, routes, state::AppState};

const HTTP_ADDR_VAR: &str = "WEATHER_HTTP_ADDR";
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::load()?;
    let state = AppState {
        service: Arc::new(LookupService::from_config(&config)),
    };
    let app = routes::create_router(state);

    let addr: SocketAddr = std::env::var(HTTP_ADDR_VAR)
        .unwrap_or_else(|_| DEFAULT_HTTP_ADDR.to_string())
        .parse()?;
    info!("Starting weather service on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
