//! Application state for the HTTP server.

use std::sync::Arc;

use weather_core::provider::{CurrentWeatherProvider, ForecastProvider, GeolocationProvider};

/// Shared application state passed to all handlers.
///
/// Providers are injected as trait objects so tests can substitute doubles
/// or point the real clients at a local mock server.
#[derive(Clone)]
pub struct AppState {
    pub geolocator: Arc<dyn GeolocationProvider>,
    pub current: Arc<dyn CurrentWeatherProvider>,
    pub forecast: Arc<dyn ForecastProvider>,
}

impl AppState {
    pub fn new(
        geolocator: Arc<dyn GeolocationProvider>,
        current: Arc<dyn CurrentWeatherProvider>,
        forecast: Arc<dyn ForecastProvider>,
    ) -> Self {
        Self { geolocator, current, forecast }
    }
}
