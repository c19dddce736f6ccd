use serde::Serialize;
use sqlx::FromRow;

/// A single dated reading at a station, as stored in the `measurement` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    /// ISO `YYYY-MM-DD`. Stored as text, so lexical order is date order.
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// A physical observation point, as stored in the `station` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

/// The min/avg/max aggregate of `tobs` over a date range.
/// All three are `None` when no row matched.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

/// How many observations a station contributed, joined with its name when known.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct StationActivity {
    pub station: String,
    pub name: Option<String>,
    pub observations: i64,
}

/// The first and last observation dates and the total row count.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DatasetSpan {
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub measurements: i64,
}
