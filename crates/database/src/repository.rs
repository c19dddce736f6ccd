use crate::DbError;
use chrono::NaiveDate;
use core_types::{
    DATE_FORMAT, DatasetSpan, DateWindow, PrecipitationReading, Station, StationActivity,
    TemperatureObservation, TemperatureStats, parse_date,
};
use sqlx::pool::PoolConnection;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

/// Length of the fixed window used for the most active station's observations.
///
/// Deliberately a fixed day count rather than a calendar year: across a leap day
/// it starts one day later than the precipitation window.
pub const TOBS_WINDOW_DAYS: u64 = 365;

/// The station with the most recorded measurement dates, and its latest date.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ActiveStation {
    pub station: String,
    pub last_date: String,
    pub observations: i64,
}

/// The `ClimateRepository` provides the read-only queries over the climate
/// database. Each method runs on a single pooled connection for its duration.
#[derive(Debug, Clone)]
pub struct ClimateRepository {
    pool: SqlitePool,
}

impl ClimateRepository {
    /// Creates a new `ClimateRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn session(&self) -> Result<PoolConnection<Sqlite>, DbError> {
        Ok(self.pool.acquire().await?)
    }

    /// Every unique station identifier present in the measurements, ascending.
    pub async fn list_distinct_stations(&self) -> Result<Vec<String>, DbError> {
        let mut conn = self.session().await?;
        let stations = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT station FROM measurement WHERE station IS NOT NULL ORDER BY station",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(stations)
    }

    /// Precipitation for the last calendar year of data.
    ///
    /// The window ends at the latest date across all stations and starts on the
    /// same day one year earlier; both ends are inclusive. Every row is returned,
    /// ordered by date then insertion, so several stations can report the same date.
    pub async fn precipitation_last_year(&self) -> Result<Vec<PrecipitationReading>, DbError> {
        let mut conn = self.session().await?;

        let Some(latest) = latest_date(&mut conn).await? else {
            return Ok(Vec::new());
        };
        let window = DateWindow::calendar_year_ending(parse_date(&latest)?)?;
        tracing::debug!(start = %window.start, end = %window.end, "Precipitation window.");

        let readings = sqlx::query_as::<_, PrecipitationReading>(
            r#"
            SELECT date, prcp
            FROM measurement
            WHERE date >= ? AND date <= ?
            ORDER BY date, id
            "#,
        )
        .bind(window.start_text())
        .bind(&latest)
        .fetch_all(&mut *conn)
        .await?;

        Ok(readings)
    }

    /// The station with the greatest count of measurement dates.
    ///
    /// Ties go to the lowest station identifier.
    pub async fn most_active_station(&self) -> Result<Option<ActiveStation>, DbError> {
        let mut conn = self.session().await?;
        fetch_most_active(&mut conn).await
    }

    /// Temperature observations of the most active station over the
    /// `TOBS_WINDOW_DAYS` days ending at that station's own latest date.
    pub async fn most_active_station_temps(&self) -> Result<Vec<TemperatureObservation>, DbError> {
        let mut conn = self.session().await?;

        let Some(active) = fetch_most_active(&mut conn).await? else {
            return Ok(Vec::new());
        };
        let window = DateWindow::days_ending(parse_date(&active.last_date)?, TOBS_WINDOW_DAYS)?;
        tracing::debug!(
            station = %active.station,
            start = %window.start,
            end = %window.end,
            "Most active station window."
        );

        let observations = sqlx::query_as::<_, TemperatureObservation>(
            r#"
            SELECT date, tobs
            FROM measurement
            WHERE station = ? AND date >= ? AND date <= ?
            ORDER BY date, id
            "#,
        )
        .bind(&active.station)
        .bind(window.start_text())
        .bind(&active.last_date)
        .fetch_all(&mut *conn)
        .await?;

        Ok(observations)
    }

    /// Min, average and max temperature over `date >= start` and, when given,
    /// `date <= end`. Always exactly one row; all `None` when nothing matched.
    pub async fn temp_stats(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<TemperatureStats, DbError> {
        let mut conn = self.session().await?;

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT MIN(tobs) AS min, AVG(tobs) AS avg, MAX(tobs) AS max FROM measurement WHERE date >= ",
        );
        builder.push_bind(start.format(DATE_FORMAT).to_string());
        if let Some(end) = end {
            builder.push(" AND date <= ");
            builder.push_bind(end.format(DATE_FORMAT).to_string());
        }

        let stats = builder
            .build_query_as::<TemperatureStats>()
            .fetch_one(&mut *conn)
            .await?;

        if stats.is_empty() {
            tracing::debug!(%start, ?end, "No temperature observations in range.");
        }

        Ok(stats)
    }

    /// Observation counts per station, busiest first, with names from the station table.
    pub async fn station_activity(&self) -> Result<Vec<StationActivity>, DbError> {
        let mut conn = self.session().await?;
        let activity = sqlx::query_as::<_, StationActivity>(
            r#"
            SELECT m.station AS station, s.name AS name, COUNT(m.date) AS observations
            FROM measurement AS m
            LEFT JOIN station AS s ON s.station = m.station
            WHERE m.station IS NOT NULL
            GROUP BY m.station, s.name
            ORDER BY observations DESC, m.station ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(activity)
    }

    /// All rows of the station table.
    pub async fn stations(&self) -> Result<Vec<Station>, DbError> {
        let mut conn = self.session().await?;
        let stations = sqlx::query_as::<_, Station>(
            "SELECT id, station, name, latitude, longitude, elevation FROM station ORDER BY station",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(stations)
    }

    /// First and last observation dates and the total number of measurements.
    pub async fn dataset_span(&self) -> Result<DatasetSpan, DbError> {
        let mut conn = self.session().await?;
        let span = sqlx::query_as::<_, DatasetSpan>(
            "SELECT MIN(date) AS first_date, MAX(date) AS last_date, COUNT(*) AS measurements FROM measurement",
        )
        .fetch_one(&mut *conn)
        .await?;
        Ok(span)
    }
}

/// Dates are ISO text, so the lexical maximum is the latest date.
async fn latest_date(conn: &mut SqliteConnection) -> Result<Option<String>, DbError> {
    let latest = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
        .fetch_one(&mut *conn)
        .await?;
    Ok(latest)
}

async fn fetch_most_active(conn: &mut SqliteConnection) -> Result<Option<ActiveStation>, DbError> {
    let active = sqlx::query_as::<_, ActiveStation>(
        r#"
        SELECT station, MAX(date) AS last_date, COUNT(date) AS observations
        FROM measurement
        WHERE station IS NOT NULL AND date IS NOT NULL
        GROUP BY station
        ORDER BY COUNT(date) DESC, station ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(&mut *conn)
    .await?;
    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, measurement, station};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn repository_with(rows: &[core_types::Measurement]) -> ClimateRepository {
        let pool = fixtures::memory_pool().await;
        fixtures::insert_measurements(&pool, rows).await;
        ClimateRepository::new(pool)
    }

    #[tokio::test]
    async fn distinct_stations_have_no_duplicates() {
        let mut rows = Vec::new();
        for i in 1..=9 {
            let id = format!("USC0051{i:04}");
            rows.push(measurement(&id, "2017-01-01", Some(0.1), 70.0));
            rows.push(measurement(&id, "2017-01-02", None, 71.0));
        }
        let repo = repository_with(&rows).await;

        let stations = repo.list_distinct_stations().await.unwrap();

        assert_eq!(stations.len(), 9);
        let mut deduped = stations.clone();
        deduped.dedup();
        assert_eq!(deduped, stations);
    }

    #[tokio::test]
    async fn precipitation_covers_one_calendar_year_inclusive() {
        let repo = repository_with(&[
            measurement("A", "2016-08-22", Some(9.9), 70.0),
            measurement("A", "2016-08-23", Some(0.1), 70.0),
            measurement("A", "2017-03-01", None, 70.0),
            measurement("B", "2017-08-23", Some(0.0), 70.0),
        ])
        .await;

        let readings = repo.precipitation_last_year().await.unwrap();

        let dates: Vec<&str> = readings.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2016-08-23", "2017-03-01", "2017-08-23"]);
        assert_eq!(readings[1].prcp, None);
    }

    #[tokio::test]
    async fn precipitation_keeps_every_row_for_a_shared_date() {
        let repo = repository_with(&[
            measurement("A", "2017-08-23", Some(0.45), 70.0),
            measurement("B", "2017-08-23", Some(0.00), 70.0),
        ])
        .await;

        let readings = repo.precipitation_last_year().await.unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].prcp, Some(0.45));
        assert_eq!(readings[1].prcp, Some(0.00));
    }

    #[tokio::test]
    async fn empty_dataset_yields_empty_results() {
        let repo = repository_with(&[]).await;

        assert!(repo.precipitation_last_year().await.unwrap().is_empty());
        assert!(repo.most_active_station_temps().await.unwrap().is_empty());
        assert!(repo.list_distinct_stations().await.unwrap().is_empty());
        assert!(repo.most_active_station().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn most_active_station_uses_its_own_fixed_window() {
        let repo = repository_with(&[
            // A is busiest, but its last date is earlier than B's.
            measurement("A", "2015-08-23", None, 60.0),
            measurement("A", "2015-08-24", None, 61.0),
            measurement("A", "2016-01-01", None, 65.0),
            measurement("A", "2016-08-23", None, 75.0),
            measurement("B", "2017-08-23", None, 80.0),
            measurement("B", "2017-08-22", None, 81.0),
        ])
        .await;

        let active = repo.most_active_station().await.unwrap().unwrap();
        assert_eq!(active.station, "A");
        assert_eq!(active.last_date, "2016-08-23");
        assert_eq!(active.observations, 4);

        let temps = repo.most_active_station_temps().await.unwrap();
        // 365 days before 2016-08-23 is 2015-08-24 because of the leap day.
        let dates: Vec<&str> = temps.iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["2015-08-24", "2016-01-01", "2016-08-23"]);
        assert_eq!(temps[2].tobs, 75.0);
    }

    #[tokio::test]
    async fn most_active_ties_go_to_the_lowest_station_id() {
        let repo = repository_with(&[
            measurement("B", "2017-01-01", None, 70.0),
            measurement("B", "2017-01-02", None, 70.0),
            measurement("A", "2017-01-01", None, 70.0),
            measurement("A", "2017-01-02", None, 70.0),
        ])
        .await;

        let active = repo.most_active_station().await.unwrap().unwrap();
        assert_eq!(active.station, "A");
    }

    #[tokio::test]
    async fn temp_stats_orders_min_avg_max() {
        let repo = repository_with(&[
            measurement("A", "2016-07-31", None, 50.0),
            measurement("A", "2016-08-01", None, 60.0),
            measurement("B", "2016-12-01", None, 70.0),
            measurement("A", "2017-01-01", None, 80.0),
            measurement("A", "2017-08-01", None, 90.0),
        ])
        .await;

        let bounded = repo.temp_stats(ymd(2016, 8, 1), Some(ymd(2017, 1, 1))).await.unwrap();
        assert_eq!(bounded.min, Some(60.0));
        assert_eq!(bounded.avg, Some(70.0));
        assert_eq!(bounded.max, Some(80.0));

        let open = repo.temp_stats(ymd(2017, 1, 1), None).await.unwrap();
        assert_eq!(open.min, Some(80.0));
        assert_eq!(open.avg, Some(85.0));
        assert_eq!(open.max, Some(90.0));

        let (min, avg, max) = (open.min.unwrap(), open.avg.unwrap(), open.max.unwrap());
        assert!(min <= avg && avg <= max);
    }

    #[tokio::test]
    async fn temp_stats_without_matches_is_all_null() {
        let repo = repository_with(&[measurement("A", "2016-08-01", None, 60.0)]).await;

        let stats = repo.temp_stats(ymd(2018, 1, 1), None).await.unwrap();
        assert!(stats.is_empty());

        let inverted = repo.temp_stats(ymd(2017, 1, 1), Some(ymd(2016, 1, 1))).await.unwrap();
        assert!(inverted.is_empty());
    }

    #[tokio::test]
    async fn station_activity_joins_names_and_sorts_by_count() {
        let pool = fixtures::memory_pool().await;
        fixtures::insert_stations(&pool, &[station("A", "WAIKIKI 717.2, HI US")]).await;
        fixtures::insert_measurements(
            &pool,
            &[
                measurement("A", "2017-01-01", None, 70.0),
                measurement("B", "2017-01-01", None, 70.0),
                measurement("B", "2017-01-02", None, 70.0),
            ],
        )
        .await;
        let repo = ClimateRepository::new(pool);

        let activity = repo.station_activity().await.unwrap();

        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].station, "B");
        assert_eq!(activity[0].observations, 2);
        assert_eq!(activity[0].name, None);
        assert_eq!(activity[1].name.as_deref(), Some("WAIKIKI 717.2, HI US"));

        let stations = repo.stations().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station, "A");
    }

    #[tokio::test]
    async fn dataset_span_reports_bounds_and_count() {
        let repo = repository_with(&[
            measurement("A", "2010-01-01", None, 70.0),
            measurement("B", "2017-08-23", None, 70.0),
        ])
        .await;

        let span = repo.dataset_span().await.unwrap();

        assert_eq!(span.first_date.as_deref(), Some("2010-01-01"));
        assert_eq!(span.last_date.as_deref(), Some("2017-08-23"));
        assert_eq!(span.measurements, 2);
    }
}
