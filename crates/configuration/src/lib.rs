use std::path::Path;

use crate::error::ConfigError;
use crate::settings::{Overrides, Settings};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, LoggingSettings, ServerSettings};
pub use telemetry::init_tracing;

/// The file looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "surfsup";

/// Prefix for environment overrides, e.g. `SURFSUP__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "SURFSUP";

/// Loads the application settings.
///
/// Sources are layered, later ones winning: built-in defaults, the TOML file
/// (`path`, or an optional `surfsup.toml`), `SURFSUP__*` environment variables,
/// then the command-line `overrides`. The result is validated before it is returned.
pub fn load_settings(path: Option<&Path>, overrides: &Overrides) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let mut builder = config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000)?
        .set_default("database.path", "Resources/hawaii.sqlite")?
        .set_default("database.max_connections", 5)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("logging.level", "info")?
        .set_default("logging.file_prefix", "surfsup.log")?
        .set_default("debug", false)?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("server.host", overrides.host.clone())?
        .set_override_option("server.port", overrides.port.map(i64::from))?
        .set_override_option(
            "database.path",
            overrides.database.as_ref().map(|p| p.to_string_lossy().into_owned()),
        )?;

    if overrides.debug {
        builder = builder.set_override("debug", true)?;
    }

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
