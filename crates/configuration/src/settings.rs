use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
    /// Verbose mode: debug-level logging regardless of `logging.level`.
    pub debug: bool,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// The pre-populated climate database.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Path to the SQLite file. It is opened read-only and never created.
    pub path: PathBuf,
    pub max_connections: u32,
    /// How long a request may wait for a pooled connection.
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info").
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

/// Values supplied on the command line. Anything left `None` keeps the
/// value from the file or environment.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct Overrides {
    /// Address to bind the HTTP server to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<String>,

    /// Port to bind the HTTP server to.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,

    /// Path to the SQLite climate database.
    #[cfg_attr(feature = "clap", arg(long))]
    pub database: Option<PathBuf>,

    /// Enable debug logging.
    #[cfg_attr(feature = "clap", arg(long))]
    pub debug: bool,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must be non-zero".to_string()));
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("database.path must be set".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.logging.file_prefix.is_empty() {
            return Err(ConfigError::ValidationError("logging.file_prefix must be set".to_string()));
        }
        Ok(())
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("invalid server address: {e}")))
    }
}
