//! HTTP handlers for the gateway endpoints.
//!
//! Every weather endpoint runs the same short flow: if the caller supplied a
//! complete location (lat+lon, or state+city), use it as-is; otherwise
//! resolve the host's location through the geolocation provider first. The
//! first failing outbound call terminates the request with a 503 envelope,
//! so the weather provider is never contacted after a geolocation failure.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::envelope;
use crate::state::AppState;

const GEOLOCATION_FAILED: &str = "Failed to make geolocation request";
const WEATHER_FAILED: &str = "Failed to make weather request";
const HOURLY_FAILED: &str = "Failed to make hourly forecast request";
const DAILY_FAILED: &str = "Failed to make daily forecast request";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /geolocator/
///
/// Returns the latitude and longitude of the host as JSON on success.
/// No inputs; the external service locates the caller by its public IP.
pub async fn geolocator(State(app): State<AppState>) -> Response {
    match app.geolocator.resolve().await {
        Ok(location) => envelope::success(location),
        Err(err) => {
            warn!(error = %err, "geolocation request failed");
            envelope::external_error(GEOLOCATION_FAILED)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// GET /weather/current
///
/// `lat` and `lon` may be supplied as query parameters. With either one
/// missing, the host location is resolved through the geolocation provider
/// first.
pub async fn current_weather(
    State(app): State<AppState>,
    Query(query): Query<CurrentWeatherQuery>,
) -> Response {
    let (lat, lon) = match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => match app.geolocator.resolve().await {
            Ok(location) => (location.latitude, location.longitude),
            Err(err) => {
                warn!(error = %err, "geolocation request failed");
                return envelope::external_error(GEOLOCATION_FAILED);
            }
        },
    };

    match app.current.current_conditions(lat, lon).await {
        Ok(conditions) => envelope::success(conditions),
        Err(err) => {
            warn!(error = %err, "current weather request failed");
            envelope::external_error(WEATHER_FAILED)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub state: Option<String>,
    pub city: Option<String>,
}

/// Region targeted by a forecast request: the caller's state/city pair when
/// complete, otherwise the resolved location's region code and city. A
/// partial pair counts as absent.
async fn forecast_target(
    app: &AppState,
    query: ForecastQuery,
) -> Result<(String, String), Response> {
    match (query.state, query.city) {
        (Some(state), Some(city)) => Ok((state, city)),
        _ => match app.geolocator.resolve().await {
            Ok(location) => Ok((location.region_code, location.city)),
            Err(err) => {
                warn!(error = %err, "geolocation request failed");
                Err(envelope::external_error(GEOLOCATION_FAILED))
            }
        },
    }
}

/// GET /weather/forecast/hourly
///
/// Returns the next 36 hours for the region. `state` is a region code
/// (e.g. CA); spaces in `city` are normalized by the provider client, so
/// both `San Fransisco` and `San_Fransisco` are accepted.
pub async fn hourly_forecast(
    State(app): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Response {
    let (state, city) = match forecast_target(&app, query).await {
        Ok(target) => target,
        Err(response) => return response,
    };

    match app.forecast.hourly_forecast(&state, &city).await {
        Ok(forecast) => envelope::success(forecast),
        Err(err) => {
            warn!(error = %err, "hourly forecast request failed");
            envelope::external_error(HOURLY_FAILED)
        }
    }
}

/// GET /weather/forecast/daily
///
/// Returns the next 10 days for the region; same parameter handling as the
/// hourly endpoint.
pub async fn daily_forecast(
    State(app): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Response {
    let (state, city) = match forecast_target(&app, query).await {
        Ok(target) => target,
        Err(response) => return response,
    };

    match app.forecast.daily_forecast(&state, &city).await {
        Ok(forecast) => envelope::success(forecast),
        Err(err) => {
            warn!(error = %err, "daily forecast request failed");
            envelope::external_error(DAILY_FAILED)
        }
    }
}
