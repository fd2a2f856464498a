//! Shared application state.

use std::sync::Arc;

use weather_core::LookupService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LookupService>,
}
