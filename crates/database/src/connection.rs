use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::time::Duration;

/// Opens a read-only connection pool onto the climate database.
///
/// The file must already exist; it is never created. A missing file is reported
/// as `DbError::MissingDatabase` rather than surfacing later as an I/O error on
/// the first request.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, DbError> {
    if !settings.path.is_file() {
        return Err(DbError::MissingDatabase(settings.path.clone()));
    }

    let options = SqliteConnectOptions::new()
        .filename(&settings.path)
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!(path = %settings.path.display(), "Opened climate database (read-only).");

    Ok(pool)
}
