//! Router configuration: routes plus tracing and CORS middleware.

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the gateway serves local dashboards and mirrors.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/geolocator/", get(handlers::geolocator))
        .route("/weather/current", get(handlers::current_weather))
        .route("/weather/forecast/hourly", get(handlers::hourly_forecast))
        .route("/weather/forecast/daily", get(handlers::daily_forecast))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
