//! Date handling for the observation windows.
//!
//! Dates live in the database as ISO `YYYY-MM-DD` text, so every window is
//! computed on `NaiveDate` and formatted back to text before it reaches SQL.

use chrono::{Days, Months, NaiveDate};

use crate::error::CoreError;

/// The on-disk and on-the-wire date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Replaces the literal `%20` sequence with `-` in a raw (undecoded) path segment.
///
/// Clients that type `2017 08 01` into a browser end up sending `2017%2008%2001`.
/// This is a targeted rewrite of that one sequence, not general percent-decoding.
pub fn normalize_path_date(raw: &str) -> String {
    raw.replace("%20", "-")
}

pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|source| CoreError::InvalidDate {
        input: input.to_string(),
        source,
    })
}

/// An inclusive `[start, end]` range of observation dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The calendar year ending at `end`: same month and day one year earlier,
    /// with Feb 29 clamped to Feb 28.
    pub fn calendar_year_ending(end: NaiveDate) -> Result<Self, CoreError> {
        let start = end
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| CoreError::WindowOutOfRange(end.to_string()))?;
        Ok(Self { start, end })
    }

    /// A fixed-length window of `days` days ending at `end`. Leap days are not
    /// compensated for, so this can differ from `calendar_year_ending` by one day.
    pub fn days_ending(end: NaiveDate, days: u64) -> Result<Self, CoreError> {
        let start = end
            .checked_sub_days(Days::new(days))
            .ok_or_else(|| CoreError::WindowOutOfRange(end.to_string()))?;
        Ok(Self { start, end })
    }

    pub fn start_text(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_text(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}
