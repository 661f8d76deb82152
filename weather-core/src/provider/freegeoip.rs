use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::{config::Config, model::Location};

use super::{GeolocationProvider, ProviderError, truncate_body};

const PROVIDER: &str = "freegeoip";

/// Client for the freegeoip JSON endpoint.
///
/// No API key and no inputs: the service geolocates whatever public IP the
/// request arrives from.
#[derive(Debug, Clone)]
pub struct FreeGeoIpProvider {
    base_url: String,
    http: Client,
}

impl FreeGeoIpProvider {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for freegeoip")?;

        Ok(Self { base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.geolocator.base_url.clone(), config.request_timeout())
    }
}

#[derive(Debug, Deserialize)]
struct FreeGeoIpResponse {
    latitude: f64,
    longitude: f64,
    // freegeoip reports empty strings rather than omitting these, but don't
    // rely on it.
    #[serde(default)]
    region_code: String,
    #[serde(default)]
    city: String,
}

#[async_trait]
impl GeolocationProvider for FreeGeoIpProvider {
    async fn resolve(&self) -> Result<Location, ProviderError> {
        debug!(url = %self.base_url, "resolving host location");

        let res = self
            .http
            .get(&self.base_url)
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

        let parsed: FreeGeoIpResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Decode { provider: PROVIDER, detail: e.to_string() })?;

        Ok(Location {
            latitude: parsed.latitude,
            longitude: parsed.longitude,
            region_code: parsed.region_code,
            city: parsed.city,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> FreeGeoIpProvider {
        FreeGeoIpProvider::new(server.uri(), Duration::from_secs(5))
            .expect("client must build")
    }

    #[tokio::test]
    async fn resolves_location_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ip": "203.0.113.7",
                "country_code": "US",
                "country_name": "United States",
                "region_code": "CA",
                "region_name": "California",
                "city": "Los Angeles",
                "latitude": 34.17,
                "longitude": -118.96,
            })))
            .mount(&server)
            .await;

        let location = provider(&server).resolve().await.expect("resolve must succeed");

        assert_eq!(location.latitude, 34.17);
        assert_eq!(location.longitude, -118.96);
        assert_eq!(location.region_code, "CA");
        assert_eq!(location.city, "Los Angeles");
    }

    #[tokio::test]
    async fn missing_optional_fields_default_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 51.5,
                "longitude": -0.12,
            })))
            .mount(&server)
            .await;

        let location = provider(&server).resolve().await.expect("resolve must succeed");

        assert!(location.region_code.is_empty());
        assert!(location.city.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_status_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = provider(&server).resolve().await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { .. }));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = provider(&server).resolve().await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }
}
