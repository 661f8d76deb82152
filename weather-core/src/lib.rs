//! Core library for the weather gateway.
//!
//! This crate defines:
//! - Configuration handling (provider endpoints, credentials, timeouts)
//! - Clients for the external geolocation and weather providers
//! - Shared domain models (locations, forecast payloads)
//!
//! It is used by `weather-server`, but can also be reused by other binaries
//! or services.

pub mod config;
pub mod model;
pub mod provider;

pub use config::Config;
pub use model::{CurrentConditions, DailyForecast, HourlyForecast, Location};
pub use provider::{
    CurrentWeatherProvider, ForecastProvider, FreeGeoIpProvider, GeolocationProvider,
    OpenWeatherProvider, ProviderError, WundergroundProvider,
};
