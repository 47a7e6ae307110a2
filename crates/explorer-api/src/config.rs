//! Configuration loading and typed config structures for the mock API.
//!
//! The configuration lives in `explorer-config.yaml` next to the server
//! binary's working directory. Every field has a default, so an empty or
//! missing file yields a working server.
//!
//! ```yaml
//! server:
//!   host: "0.0.0.0"
//!   port: 3000
//! api:
//!   latency_ms: 200
//!   catalog_path: "data/experiences.json"
//! logging:
//!   level: "info"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an invalid value.
    #[error("invalid value for {var}: {value:?}")]
    Env {
        /// The environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExplorerConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Mock API behaviour.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExplorerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listener:
    /// - `EXPLORER_HOST` overrides `server.host`
    /// - `EXPLORER_PORT` overrides `server.port`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_env_overrides()?;
        Ok(config)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Apply `EXPLORER_HOST` / `EXPLORER_PORT` overrides.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("EXPLORER_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("EXPLORER_PORT") {
            self.port = val.parse().map_err(|_parse_err| ConfigError::Env {
                var: "EXPLORER_PORT",
                value: val.clone(),
            })?;
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Mock API behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Simulated network latency before the catalog is returned.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Catalog document to serve. The bundled catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl ApiConfig {
    /// The simulated latency as a [`Duration`].
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            catalog_path: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when
    /// set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

const fn default_latency_ms() -> u64 {
    200
}

fn default_log_level() -> String {
    String::from("info")
}
