use crate::model::{CurrentConditions, DailyForecast, HourlyForecast, Location};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod freegeoip;
pub mod openweather;
pub mod wunderground;

pub use freegeoip::FreeGeoIpProvider;
pub use openweather::OpenWeatherProvider;
pub use wunderground::WundergroundProvider;

/// Failure of a single outbound provider call.
///
/// Calls are never retried; the first failure is terminal for the request
/// that triggered it. The HTTP layer collapses every variant into one
/// external-error response, so the distinctions here exist for logging.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {provider} response: {detail}")]
    Decode { provider: &'static str, detail: String },

    #[error("unexpected {provider} payload: {detail}")]
    Payload { provider: &'static str, detail: String },
}

/// Resolves the host's own network location via an external service.
#[async_trait]
pub trait GeolocationProvider: Send + Sync + Debug {
    /// Performs one outbound call. Takes no input; the provider locates
    /// the caller by its public IP.
    async fn resolve(&self) -> Result<Location, ProviderError>;
}

/// Current weather by coordinates.
#[async_trait]
pub trait CurrentWeatherProvider: Send + Sync + Debug {
    async fn current_conditions(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentConditions, ProviderError>;
}

/// Hourly and daily forecasts by region code and city.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Exactly 36 ordered entries on success.
    async fn hourly_forecast(
        &self,
        state: &str,
        city: &str,
    ) -> Result<HourlyForecast, ProviderError>;

    /// Exactly 10 ordered entries on success.
    async fn daily_forecast(
        &self,
        state: &str,
        city: &str,
    ) -> Result<DailyForecast, ProviderError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
