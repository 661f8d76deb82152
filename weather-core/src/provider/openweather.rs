use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::{config::Config, model::CurrentConditions};

use super::{CurrentWeatherProvider, ProviderError, truncate_body};

const PROVIDER: &str = "openweather";

/// Client for the OpenWeatherMap current-weather endpoint.
///
/// The API key is held server side; callers of the gateway never supply it.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for openweather")?;

        Ok(Self { api_key, base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        if config.openweather.api_key.is_empty() {
            bail!(
                "No API key configured for openweather.\n\
                 Hint: set `api_key` under [openweather] in the config file."
            );
        }

        Self::new(
            config.openweather.api_key.clone(),
            config.openweather.base_url.clone(),
            config.request_timeout(),
        )
    }
}

#[async_trait]
impl CurrentWeatherProvider for OpenWeatherProvider {
    async fn current_conditions(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentConditions, ProviderError> {
        let url = format!("{}/weather", self.base_url);
        debug!(%lat, %lon, "requesting current conditions");

        let lat_s = lat.to_string();
        let lon_s = lon.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat_s.as_str()),
                ("lon", lon_s.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Request { provider: PROVIDER, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ProviderError::Request { provider: PROVIDER, source })?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status,
                body: truncate_body(&body),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode { provider: PROVIDER, detail: e.to_string() })?;

        Ok(CurrentConditions(value))
    }
}
