//! # SurfsUp Core Types
//!
//! The shared vocabulary of the workspace: the record types persisted in the
//! climate database, the row shapes returned by the query layer, the date
//! window arithmetic used to scope those queries, and the positional response
//! formatter that turns rows into JSON records.

pub mod dates;
pub mod error;
pub mod format;
pub mod records;

// Re-export the core types to provide a clean public API.
pub use dates::{DATE_FORMAT, DateWindow, normalize_path_date, parse_date};
pub use error::CoreError;
pub use format::{FieldValues, TEMPERATURE_STAT_FIELDS, TOBS_FIELDS, to_records};
pub use records::{
    DatasetSpan, Measurement, PrecipitationReading, Station, StationActivity,
    TemperatureObservation, TemperatureStats,
};
