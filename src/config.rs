use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::RankThresholds;
use crate::services::weather::DEFAULT_WEATHER_URL;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// TOML file holding the `[[treks]]` catalog
    #[serde(default = "default_catalog_path")]
    pub path: String,
    /// Optional TOML file replacing the bundled category tables
    pub categories_path: Option<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            categories_path: None,
        }
    }
}

fn default_catalog_path() -> String { "data/treks.toml".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_minimum_score")]
    pub minimum_score: u8,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            minimum_score: default_minimum_score(),
            limit: default_limit(),
        }
    }
}

impl MatchingSettings {
    pub fn thresholds(&self) -> RankThresholds {
        RankThresholds {
            minimum: self.minimum_score,
            limit: self.limit,
        }
    }
}

fn default_minimum_score() -> u8 { RankThresholds::default().minimum }
fn default_limit() -> usize { RankThresholds::default().limit }

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSettings {
    pub api_key: Option<String>,
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_url(),
            timeout_secs: default_weather_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            cache_size: default_cache_size(),
        }
    }
}

fn default_weather_url() -> String { DEFAULT_WEATHER_URL.to_string() }
fn default_weather_timeout() -> u64 { 5 }
fn default_cache_ttl() -> u64 { 600 }
fn default_cache_size() -> u64 { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., TREKMATCH__SERVER__PORT -> server.port
    Environment::with_prefix("TREKMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TREKMATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment());

        // The provider key is commonly exported without the prefix
        if let Ok(api_key) = std::env::var("OPENWEATHER_API_KEY") {
            builder = builder.set_override("weather.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.minimum_score, 40);
        assert_eq!(matching.limit, 6);
        assert_eq!(matching.thresholds(), RankThresholds::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[matching]\nminimum_score = 55\n\n[weather]\ntimeout_secs = 2"
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.matching.minimum_score, 55);
        assert_eq!(settings.matching.limit, 6);
        assert_eq!(settings.weather.timeout_secs, 2);
        assert_eq!(settings.weather.base_url, DEFAULT_WEATHER_URL);
        assert_eq!(settings.catalog.path, "data/treks.toml");
    }
}
