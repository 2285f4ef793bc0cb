//! Server configuration loaded from the environment.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `8080`)
//! - `LOG_FORMAT`: `text` (default) | `json`
//! - `WORKER_THREADS`: Number of tokio worker threads (default: logical CPU count)
//!
//! # Example
//!
//! ```ignore
//! use task_tracker_api::infrastructure::ServerConfig;
//!
//! let config = ServerConfig::from_env()?;
//! let listener = TcpListener::bind(config.socket_address()?).await?;
//! ```

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// Configuration Types
// =============================================================================

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigurationError;

    /// Parses a log format from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidLogFormat` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "pretty" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `PORT` or `LOG_FORMAT` holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `PORT` or `LOG_FORMAT` holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match read("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let log_format = match read("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host,
            port,
            log_format,
        })
    }

    /// Resolves the bind address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidAddress` if `host:port` is not a socket address.
    pub fn socket_address(&self) -> Result<SocketAddr, ConfigurationError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ConfigurationError::InvalidAddress(address))
    }
}

// =============================================================================
// Worker Threads
// =============================================================================

/// Result of parsing the `WORKER_THREADS` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerThreads {
    /// Thread count to configure, or `None` for the runtime default.
    pub threads: Option<usize>,
    /// Warning to report when the value was rejected or capped.
    pub warning: Option<String>,
}

impl WorkerThreads {
    /// Reads `WORKER_THREADS` from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let max_threads = std::thread::available_parallelism()
            .map(|parallelism| parallelism.get().saturating_mul(4))
            .unwrap_or(64);
        Self::parse(env::var("WORKER_THREADS").ok().as_deref(), max_threads)
    }

    /// Interprets a raw `WORKER_THREADS` value against an upper bound.
    #[must_use]
    pub fn parse(value: Option<&str>, max_threads: usize) -> Self {
        let trimmed = value.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Self {
                threads: None,
                warning: None,
            };
        }

        match trimmed.parse::<usize>() {
            Ok(0) => Self {
                threads: None,
                warning: Some(
                    "WORKER_THREADS=0 is invalid (must be > 0), using default".to_string(),
                ),
            },
            Ok(n) if n > max_threads => Self {
                threads: Some(max_threads),
                warning: Some(format!(
                    "WORKER_THREADS={n} exceeds recommended limit ({max_threads}), capping to {max_threads}"
                )),
            },
            Ok(n) => Self {
                threads: Some(n),
                warning: None,
            },
            Err(error) => Self {
                threads: None,
                warning: Some(format!(
                    "WORKER_THREADS='{trimmed}' is not a valid number ({error}), using default"
                )),
            },
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `PORT` is not a valid port number.
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    /// `LOG_FORMAT` is not recognized.
    #[error("Invalid log format: {0}. Valid values: text, json")]
    InvalidLogFormat(String),

    /// `HOST` and `PORT` do not form a socket address.
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),
}

// =============================================================================
// Tests
// =============================================================================
