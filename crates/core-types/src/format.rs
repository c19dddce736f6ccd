//! Positional response formatting.
//!
//! Query rows are fixed-arity tuples; the API exposes them as JSON objects whose
//! keys come from a parallel list of field names.

use serde_json::{Map, Value};

use crate::records::{TemperatureObservation, TemperatureStats};

/// Field names for the `/tobs` listing.
pub const TOBS_FIELDS: [&str; 2] = ["date", "temperature"];

/// Field names for the min/avg/max aggregate rows.
pub const TEMPERATURE_STAT_FIELDS: [&str; 3] = ["TMin", "TAvg", "TMax"];

/// A row that can be read positionally.
pub trait FieldValues {
    fn field_values(&self) -> Vec<Value>;
}

impl FieldValues for TemperatureObservation {
    fn field_values(&self) -> Vec<Value> {
        vec![Value::from(self.date.as_str()), Value::from(self.tobs)]
    }
}

impl FieldValues for TemperatureStats {
    fn field_values(&self) -> Vec<Value> {
        vec![
            Value::from(self.min),
            Value::from(self.avg),
            Value::from(self.max),
        ]
    }
}

#[cfg(test)]
impl FieldValues for Vec<Value> {
    fn field_values(&self) -> Vec<Value> {
        self.clone()
    }
}

/// Zips each row's values with `names`, one record per row, in row order.
///
/// When the name list and the row arity differ, the shorter one wins and the
/// surplus is dropped.
pub fn to_records<R: FieldValues>(rows: &[R], names: &[&str]) -> Vec<Map<String, Value>> {
    rows.iter()
        .map(|row| {
            names
                .iter()
                .zip(row.field_values())
                .map(|(name, value)| (name.to_string(), value))
                .collect()
        })
        .collect()
}
