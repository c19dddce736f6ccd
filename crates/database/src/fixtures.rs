//! In-memory databases for tests, shaped like the production `hawaii.sqlite`.

use core_types::{Measurement, Station};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// A single-connection pool over a fresh in-memory database with both tables created.
///
/// The pool is capped at one connection that never expires, since every new
/// `sqlite::memory:` connection would otherwise see its own empty database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should open");
    create_schema(&pool).await.expect("schema should be created");
    pool
}

pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER NOT NULL PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE TABLE station (
            id INTEGER NOT NULL PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Builds a measurement; ids are assigned on insert.
pub fn measurement(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Measurement {
    Measurement {
        id: 0,
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs,
    }
}

pub fn station(station: &str, name: &str) -> Station {
    Station {
        id: 0,
        station: station.to_string(),
        name: name.to_string(),
        latitude: 21.3,
        longitude: -157.8,
        elevation: 3.0,
    }
}

/// Inserts rows in slice order, so row ids follow that order.
pub async fn insert_measurements(pool: &SqlitePool, rows: &[Measurement]) {
    for row in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?, ?, ?, ?)")
            .bind(&row.station)
            .bind(&row.date)
            .bind(row.prcp)
            .bind(row.tobs)
            .execute(pool)
            .await
            .expect("measurement insert");
    }
}

pub async fn insert_stations(pool: &SqlitePool, rows: &[Station]) {
    for row in rows {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&row.station)
        .bind(&row.name)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(row.elevation)
        .execute(pool)
        .await
        .expect("station insert");
    }
}

/// Runs a raw statement, e.g. to break the schema in failure-path tests.
pub async fn execute(pool: &SqlitePool, sql: &str) {
    sqlx::query(sql).execute(pool).await.expect("fixture statement");
}
