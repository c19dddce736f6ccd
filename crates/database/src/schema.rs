use sqlx::SqlitePool;

use crate::error::DbError;

/// Columns `core_types::Measurement` is mapped from.
pub const MEASUREMENT_COLUMNS: [&str; 5] = ["id", "station", "date", "prcp", "tobs"];

/// Columns `core_types::Station` is mapped from.
pub const STATION_COLUMNS: [&str; 6] =
    ["id", "station", "name", "latitude", "longitude", "elevation"];

/// Checks that the existing database carries the tables and columns the record
/// types are declared against. Extra columns are ignored.
pub async fn verify_schema(pool: &SqlitePool) -> Result<(), DbError> {
    verify_table(pool, "measurement", &MEASUREMENT_COLUMNS).await?;
    verify_table(pool, "station", &STATION_COLUMNS).await?;
    tracing::debug!("Database schema matches the measurement and station records.");
    Ok(())
}

async fn verify_table(pool: &SqlitePool, table: &str, expected: &[&str]) -> Result<(), DbError> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?)")
        .bind(table)
        .fetch_all(pool)
        .await?;

    if columns.is_empty() {
        return Err(DbError::MissingTable(table.to_string()));
    }

    for column in expected {
        if !columns.iter().any(|c| c.eq_ignore_ascii_case(column)) {
            return Err(DbError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }

    Ok(())
}
