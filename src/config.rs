//! Configuration management for nico_fetcher
//!
//! An optional TOML configuration file tunes the HTTP client and the fetcher
//! fan-out. The TOML layer uses plain mirror structs with second-based
//! duration fields which convert into the runtime configurations.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::ClientConfig;
use crate::constants::{http, limits, logging, origin, workers};
use crate::errors::{ConfigError, Result};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Batch fetcher settings
    pub fetcher: FetcherConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Distribution origin override (None = built-in origin)
    pub origin: Option<String>,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Connection pool idle timeout in seconds (None = no timeout)
    pub pool_idle_timeout_secs: Option<u64>,
    /// Maximum connections per host
    pub pool_max_per_host: usize,
    /// TCP nodelay setting
    pub tcp_nodelay: bool,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            origin: None,
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
            pool_idle_timeout_secs: Some(http::POOL_IDLE_TIMEOUT.as_secs()),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            tcp_nodelay: true,
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
        }
    }
}

/// TOML-friendly fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfigToml {
    /// Concurrent file fetches per category
    pub workers: usize,
}

impl Default for FetcherConfigToml {
    fn default() -> Self {
        Self {
            workers: workers::DEFAULT_WORKER_COUNT,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an explicit file, or fall back to defaults
    ///
    /// # Errors
    ///
    /// Fails when an explicitly requested file is missing, unreadable, or not
    /// valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw).map_err(ConfigError::InvalidFormat)?;

        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate field values that serde cannot check
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetcher.workers".to_string(),
                value: "0".to_string(),
                reason: "at least one worker is required".to_string(),
            }
            .into());
        }

        if self.client.rate_limit_rps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.rate_limit_rps".to_string(),
                value: "0".to_string(),
                reason: "rate limit must be at least 1 request per second".to_string(),
            }
            .into());
        }

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: "expected one of trace, debug, info, warn, error".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Convert the TOML client section into the runtime client configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            origin: self
                .client
                .origin
                .clone()
                .unwrap_or_else(|| origin::BASE_URL.to_string()),
            request_timeout: Duration::from_secs(self.client.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.client.connect_timeout_secs),
            pool_idle_timeout: self.client.pool_idle_timeout_secs.map(Duration::from_secs),
            pool_max_per_host: self.client.pool_max_per_host,
            tcp_nodelay: self.client.tcp_nodelay,
            rate_limit_rps: self.client.rate_limit_rps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.fetcher.workers, workers::DEFAULT_WORKER_COUNT);
        assert_eq!(config.client_config().origin, origin::BASE_URL);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[fetcher]\nworkers = 2\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.fetcher.workers, 2);
        assert_eq!(
            config.client.rate_limit_rps,
            limits::DEFAULT_RATE_LIMIT_RPS
        );
    }

    #[test]
    fn test_origin_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[client]\norigin = \"http://localhost:9999\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.client_config().origin, "http://localhost:9999");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not toml at all [").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[fetcher]\nworkers = 0\n").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_unknown_logging_level_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"chatty\"\n").unwrap();

        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = AppConfig::default();
        let raw = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&raw).unwrap();

        assert_eq!(parsed.fetcher.workers, config.fetcher.workers);
        assert_eq!(parsed.client.rate_limit_rps, config.client.rate_limit_rps);
    }
}
