//! HTTP surface of the weather gateway.
//!
//! An axum-based server exposing geolocation and weather endpoints backed
//! by the provider clients in `weather-core`. Responses share one JSON
//! envelope shape; see [`envelope`].

pub mod envelope;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
