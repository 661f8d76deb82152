use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

fn default_timeout_secs() -> u64 {
    10
}

fn default_geolocator_url() -> String {
    "https://freegeoip.app/json/".to_string()
}

fn default_openweather_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_wunderground_url() -> String {
    "http://api.wunderground.com/api".to_string()
}

/// Settings for the external geolocation provider. No API key needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocatorConfig {
    #[serde(default = "default_geolocator_url")]
    pub base_url: String,
}

impl Default for GeolocatorConfig {
    fn default() -> Self {
        Self { base_url: default_geolocator_url() }
    }
}

/// Settings for the current-weather provider.
///
/// Example TOML:
/// [openweather]
/// api_key = "..."
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_openweather_url")]
    pub base_url: String,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self { api_key: String::new(), base_url: default_openweather_url() }
    }
}

/// Settings for the forecast provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WundergroundConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_wunderground_url")]
    pub base_url: String,
}

impl Default for WundergroundConfig {
    fn default() -> Self {
        Self { api_key: String::new(), base_url: default_wunderground_url() }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timeout applied to every outbound provider call. Calls are never
    /// retried, so this bounds the total time a request can spend waiting
    /// on a provider.
    pub request_timeout_secs: u64,

    pub geolocator: GeolocatorConfig,
    pub openweather: OpenWeatherConfig,
    pub wunderground: WundergroundConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            geolocator: GeolocatorConfig::default(),
            openweather: OpenWeatherConfig::default(),
            wunderground: WundergroundConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or return defaults if the
    /// file doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        Self::load_path(&path)
    }

    /// Load config from an explicit file path.
    pub fn load_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-gateway", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Timeout for a single outbound provider call.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
