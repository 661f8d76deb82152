//! Binary entry point for the weather gateway server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use weather_core::Config;
use weather_core::provider::{FreeGeoIpProvider, OpenWeatherProvider, WundergroundProvider};
use weather_server::{AppState, create_router};

/// Gateway over external geolocation and weather providers.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather gateway HTTP server")]
struct Args {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Path to a TOML config file; defaults to the platform config dir.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_path(path)?,
        None => Config::load()?,
    };

    // Fail fast on missing credentials instead of 503ing every request.
    let geolocator = FreeGeoIpProvider::from_config(&config)?;
    let current = OpenWeatherProvider::from_config(&config)?;
    let forecast = WundergroundProvider::from_config(&config)?;

    let state = AppState::new(Arc::new(geolocator), Arc::new(current), Arc::new(forecast));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.host, args.port))?;

    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Resolves when SIGINT (ctrl-c) or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
