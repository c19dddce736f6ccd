use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{OriginalUri, State},
    response::Html,
};
use chrono::NaiveDate;
use core_types::{TEMPERATURE_STAT_FIELDS, TOBS_FIELDS, normalize_path_date, parse_date, to_records};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One formatted record per row, keyed by field name.
type Records = Vec<Map<String, Value>>;

const INDEX_HTML: &str = concat!(
    "<h1>Available Routes:</h1><br/>",
    r#"<a href="/api/v1.0/precipitation"><b>/api/v1.0/precipitation</b></a><br/>"#,
    r#"<a href="/api/v1.0/stations"><b>/api/v1.0/stations</b></a><br/>"#,
    r#"<a href="/api/v1.0/tobs"><b>/api/v1.0/tobs</b></a><br/>"#,
    r#"<a href="/api/v1.0/2017-08-01"><b>/api/v1.0/&lt;start_date(YYYY-MM-DD)&gt;</b></a><br/>"#,
    r#"<a href="/api/v1.0/2016-08-01/2017-01-01"><b>/api/v1.0/&lt;start_date&gt;/&lt;end_date&gt;</b></a><br/>"#,
);

/// # GET /
/// Lists the available API routes.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// # GET /api/v1.0/precipitation
/// Date → precipitation over the last year of data. When several stations
/// report the same date, the last row read wins.
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, Option<f64>>>, AppError> {
    let readings = state.repo.precipitation_last_year().await?;
    let by_date: BTreeMap<_, _> = readings
        .into_iter()
        .map(|reading| (reading.date, reading.prcp))
        .collect();
    Ok(Json(by_date))
}

/// # GET /api/v1.0/stations
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, AppError> {
    let stations = state.repo.list_distinct_stations().await?;
    Ok(Json(stations))
}

/// # GET /api/v1.0/tobs
/// Temperature observations for the most active station over its last 365 days.
pub async fn get_tobs(State(state): State<Arc<AppState>>) -> Result<Json<Records>, AppError> {
    let observations = state.repo.most_active_station_temps().await?;
    Ok(Json(to_records(&observations, &TOBS_FIELDS)))
}

/// Prefix shared by the temperature range routes.
const API_PREFIX: &str = "/api/v1.0/";

/// # GET /api/v1.0/:start_date
/// Min, average and max temperature on or after `start_date`.
pub async fn get_temperature_stats_from(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Records>, AppError> {
    let segments = raw_date_segments(uri.path())?;
    let start = date_segment(&segments, 0, "start_date")?;
    let stats = state.repo.temp_stats(start, None).await?;
    Ok(Json(to_records(&[stats], &TEMPERATURE_STAT_FIELDS)))
}

/// # GET /api/v1.0/:start_date/:end_date
/// Min, average and max temperature between both dates, inclusive.
pub async fn get_temperature_stats_between(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<Records>, AppError> {
    let segments = raw_date_segments(uri.path())?;
    let start = date_segment(&segments, 0, "start_date")?;
    let end = date_segment(&segments, 1, "end_date")?;
    let stats = state.repo.temp_stats(start, Some(end)).await?;
    Ok(Json(to_records(&[stats], &TEMPERATURE_STAT_FIELDS)))
}

/// The path segments after `/api/v1.0/`, still percent-encoded.
///
/// Axum's path extractors decode captures before the handler sees them, so the
/// date segments are read from the request URI instead.
fn raw_date_segments(path: &str) -> Result<Vec<&str>, AppError> {
    let rest = path
        .strip_prefix(API_PREFIX)
        .ok_or_else(|| AppError::BadRequest(format!("unexpected path '{path}'")))?;
    Ok(rest.split('/').collect())
}

/// Rewrites a literal `%20` in the raw segment to `-`, then parses it.
fn date_segment(segments: &[&str], index: usize, name: &str) -> Result<NaiveDate, AppError> {
    let raw = segments
        .get(index)
        .ok_or_else(|| AppError::BadRequest(format!("missing path parameter '{name}'")))?;
    Ok(parse_date(&normalize_path_date(raw))?)
}
