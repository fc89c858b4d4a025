//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Lichess API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LichessConfig {
    /// Base URL of the Lichess API
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Window start for game exports, epoch milliseconds
    #[serde(default = "default_since_ms")]
    pub since_ms: i64,

    /// Maximum games fetched per request
    #[serde(default = "default_max_games")]
    pub max_games: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> Url {
    Url::parse("https://lichess.org").expect("static URL")
}

fn default_since_ms() -> i64 {
    // 2025-01-01T00:00:00Z
    1_735_689_600_000
}

fn default_max_games() -> u32 {
    300
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("lichess-stats/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for LichessConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            since_ms: default_since_ms(),
            max_games: default_max_games(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub lichess: LichessConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            lichess: LichessConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.lichess.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Lichess timeout must be greater than 0".to_string(),
            ));
        }

        if self.lichess.max_games == 0 {
            return Err(ConfigError::ValidationError(
                "Lichess max_games must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.lichess.base_url.as_str(), "https://lichess.org/");
        assert_eq!(config.lichess.since_ms, 1_735_689_600_000);
        assert_eq!(config.lichess.max_games, 300);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_timeout() {
        let mut config = AppConfig::default();
        config.lichess.timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_max_games() {
        let mut config = AppConfig::default();
        config.lichess.max_games = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [lichess]
            max_games = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.lichess.max_games, 50);
        assert_eq!(config.lichess.timeout_seconds, 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.server.port, parsed.server.port);
        assert_eq!(config.lichess.since_ms, parsed.lichess.since_ms);
    }
}
