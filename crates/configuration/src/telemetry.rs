use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::ConfigError;
use crate::settings::LoggingSettings;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `logging.level` is used, raised to
/// `debug` when `debug` is set. If a log directory is configured, a second,
/// non-blocking layer writes to a daily-rolling file. The returned guard must be
/// held for the life of the process or buffered file output is lost.
pub fn init_tracing(
    logging: &LoggingSettings,
    debug: bool,
) -> Result<Option<WorkerGuard>, ConfigError> {
    let level = if debug { "debug" } else { logging.level.as_str() };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| ConfigError::TelemetryError(e.to_string()))?,
    };

    let stdout_layer = fmt::layer().with_target(debug);

    let guard = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &logging.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .map_err(|e| ConfigError::TelemetryError(e.to_string()))?;
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()
                .map_err(|e| ConfigError::TelemetryError(e.to_string()))?;
            None
        }
    };

    Ok(guard)
}
