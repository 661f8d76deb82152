use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::Config,
    model::{DAILY_ENTRIES, DailyForecast, HOURLY_ENTRIES, HourlyForecast},
};

use super::{ForecastProvider, ProviderError, truncate_body};

const PROVIDER: &str = "wunderground";

/// Client for the Weather Underground forecast endpoints.
///
/// Requests address a region as `/q/{state}/{city}.json`, where `state` is
/// a region code (e.g. CA) and `city` must carry underscores instead of
/// spaces.
#[derive(Debug, Clone)]
pub struct WundergroundProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WundergroundProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for wunderground")?;

        Ok(Self { api_key, base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        if config.wunderground.api_key.is_empty() {
            bail!(
                "No API key configured for wunderground.\n\
                 Hint: set `api_key` under [wunderground] in the config file."
            );
        }

        Self::new(
            config.wunderground.api_key.clone(),
            config.wunderground.base_url.clone(),
            config.request_timeout(),
        )
    }

    async fn fetch(&self, url: &str) -> Result<String, ProviderError> {
        let res = self
            .http
            .get(url)
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

        Ok(body)
    }
}

/// The provider rejects city names containing spaces; geolocation results
/// (and callers) may contain them, so the substitution happens here, at the
/// single point where the path is built.
fn normalize_city(city: &str) -> String {
    city.replace(' ', "_")
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    hourly_forecast: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    forecast: ForecastNode,
}

#[derive(Debug, Deserialize)]
struct ForecastNode {
    simpleforecast: SimpleForecast,
}

#[derive(Debug, Deserialize)]
struct SimpleForecast {
    forecastday: Vec<Value>,
}

#[async_trait]
impl ForecastProvider for WundergroundProvider {
    async fn hourly_forecast(
        &self,
        state: &str,
        city: &str,
    ) -> Result<HourlyForecast, ProviderError> {
        let url = format!(
            "{}/{}/hourly/q/{}/{}.json",
            self.base_url,
            self.api_key,
            state,
            normalize_city(city)
        );
        debug!(%state, %city, "requesting hourly forecast");

        let body = self.fetch(&url).await?;
        let parsed: HourlyResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode { provider: PROVIDER, detail: e.to_string() })?;

        let entries = parsed.hourly_forecast;
        if entries.len() != HOURLY_ENTRIES {
            return Err(ProviderError::Payload {
                provider: PROVIDER,
                detail: format!(
                    "expected {HOURLY_ENTRIES} hourly entries, got {}",
                    entries.len()
                ),
            });
        }

        Ok(HourlyForecast(entries))
    }

    async fn daily_forecast(
        &self,
        state: &str,
        city: &str,
    ) -> Result<DailyForecast, ProviderError> {
        let url = format!(
            "{}/{}/forecast10day/q/{}/{}.json",
            self.base_url,
            self.api_key,
            state,
            normalize_city(city)
        );
        debug!(%state, %city, "requesting daily forecast");

        let body = self.fetch(&url).await?;
        let parsed: DailyResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode { provider: PROVIDER, detail: e.to_string() })?;

        let entries = parsed.forecast.simpleforecast.forecastday;
        if entries.len() != DAILY_ENTRIES {
            return Err(ProviderError::Payload {
                provider: PROVIDER,
                detail: format!("expected {DAILY_ENTRIES} daily entries, got {}", entries.len()),
            });
        }

        Ok(DailyForecast(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> WundergroundProvider {
        WundergroundProvider::new("KEY".to_string(), server.uri(), Duration::from_secs(5))
            .expect("client must build")
    }

    fn hourly_entries(count: usize) -> Vec<Value> {
        (0..count)
            .map(|h| {
                serde_json::json!({
                    "FCTTIME": {"hour": h.to_string()},
                    "temp": {"english": "61", "metric": "16"},
                    "condition": "Clear",
                })
            })
            .collect()
    }

    fn daily_entries(count: usize) -> Vec<Value> {
        (1..=count)
            .map(|d| serde_json::json!({"period": d, "conditions": "Partly Cloudy"}))
            .collect()
    }

    fn hourly_body(count: usize) -> Value {
        serde_json::json!({"hourly_forecast": hourly_entries(count)})
    }

    fn daily_body(count: usize) -> Value {
        serde_json::json!({"forecast": {"simpleforecast": {"forecastday": daily_entries(count)}}})
    }

    #[test]
    fn normalize_city_replaces_every_space() {
        assert_eq!(normalize_city("San Fransisco"), "San_Fransisco");
        assert_eq!(normalize_city("New York City"), "New_York_City");
        assert_eq!(normalize_city("Ventura"), "Ventura");
    }

    #[tokio::test]
    async fn hourly_returns_all_36_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/KEY/hourly/q/CA/Ventura.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(36)))
            .expect(1)
            .mount(&server)
            .await;

        let forecast = provider(&server)
            .hourly_forecast("CA", "Ventura")
            .await
            .expect("request must succeed");

        assert_eq!(forecast.0.len(), 36);
    }

    #[tokio::test]
    async fn hourly_request_path_uses_underscored_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/KEY/hourly/q/CA/San_Fransisco.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(36)))
            .expect(1)
            .mount(&server)
            .await;

        provider(&server)
            .hourly_forecast("CA", "San Fransisco")
            .await
            .expect("request must succeed");
    }

    #[tokio::test]
    async fn hourly_with_wrong_entry_count_is_payload_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(12)))
            .mount(&server)
            .await;

        let err = provider(&server).hourly_forecast("CA", "Ventura").await.unwrap_err();
        assert!(matches!(err, ProviderError::Payload { .. }));
    }

    #[tokio::test]
    async fn daily_returns_all_10_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/KEY/forecast10day/q/CA/Los_Angeles.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(daily_body(10)))
            .expect(1)
            .mount(&server)
            .await;

        let forecast = provider(&server)
            .daily_forecast("CA", "Los Angeles")
            .await
            .expect("request must succeed");

        assert_eq!(forecast.0.len(), 10);
    }

    #[tokio::test]
    async fn daily_with_wrong_entry_count_is_payload_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(daily_body(7)))
            .mount(&server)
            .await;

        let err = provider(&server).daily_forecast("CA", "Ventura").await.unwrap_err();
        assert!(matches!(err, ProviderError::Payload { .. }));
    }

    #[tokio::test]
    async fn upstream_error_is_status_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = provider(&server).hourly_forecast("CA", "Ventura").await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { .. }));
    }

    #[test]
    fn from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = WundergroundProvider::from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }
}
