//! Configuration management
//!
//! Loads configuration from config.toml at startup. All values are
//! configurable to avoid hardcoded constants.

use crate::{Result, StatsError};
use serde::{Deserialize, Serialize};

/// Service configuration
///
/// Loaded from config.toml at startup. Missing file means defaults; a file
/// that exists but fails to parse is an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Aggregation window settings
    #[serde(default)]
    pub window: WindowConfig,

    /// API server settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Aggregation window configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Trailing window length in seconds (one bucket per second)
    #[serde(default = "default_window_seconds")]
    pub seconds: u64,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_api_bind")]
    pub bind: String,

    /// Port for the HTTP server
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            seconds: default_window_seconds(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_api_bind(),
            port: default_api_port(),
        }
    }
}

fn default_window_seconds() -> u64 {
    60
}

fn default_api_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from config.toml
    ///
    /// Path is taken from the CONFIG_PATH environment variable, falling back
    /// to ./config.toml. A missing file yields the default configuration.
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => {
                let config: Config = toml::from_str(&contents)
                    .map_err(|e| StatsError::Config(e.to_string()))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(StatsError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.seconds, 60);
        assert_eq!(config.api.bind, "0.0.0.0");
        assert_eq!(config.api.port, 8080);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str("[window]\nseconds = 120\n").unwrap();
        assert_eq!(config.window.seconds, 120);
        // Unspecified sections fall back to defaults
        assert_eq!(config.api.port, 8080);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
            [window]
            seconds = 30

            [api]
            bind = "127.0.0.1"
            port = 9000
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.window.seconds, 30);
        assert_eq!(config.api.bind, "127.0.0.1");
        assert_eq!(config.api.port, 9000);
    }
}
