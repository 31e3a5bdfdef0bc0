//! Dhaka-normalized calendar dates.
//!
//! Every date comparison in the reconciliation logic happens on Bangladesh
//! calendar days. Raw values arrive as UTC instants or as loose strings; this
//! module is the single place where they become `NaiveDate`s in the
//! `Asia/Dhaka` timezone, so two instants on the same Dhaka day always
//! compare equal no matter where the host machine runs.

pub mod schedule;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use thiserror::Error;

pub use schedule::{ScheduleMode, collection_dates};

/// The business timezone. All collection days are Dhaka calendar days.
pub const DHAKA: Tz = chrono_tz::Asia::Dhaka;

/// Errors produced while normalizing or generating calendar dates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The input could not be read as a date or timestamp.
    #[error("Unparseable date: {0:?}")]
    Unparseable(String),

    /// The year/month pair does not name a real month.
    #[error("Invalid month {month} of year {year}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month (1-12).
        month: u32,
    },
}

/// Converts a UTC instant to its Dhaka calendar day.
#[must_use]
pub fn local_calendar_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&DHAKA).date_naive()
}

/// Parses a loose date value into a Dhaka calendar day.
///
/// Accepts RFC 3339 timestamps (normalized through the Dhaka timezone) and
/// plain `YYYY-MM-DD` dates (taken as already-local calendar days). Anything
/// else is an error, never a panic; callers decide how a bad date degrades.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalendarError::Unparseable(raw.to_string()));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(local_calendar_date(instant.with_timezone(&Utc)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    Err(CalendarError::Unparseable(raw.to_string()))
}

/// Absolute distance between two calendar days, in days.
#[must_use]
pub fn day_distance(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days().abs()
}

/// Returns true iff `date` is within `window` calendar days of `target`.
///
/// Equality of normalized dates is exact; this windowed comparison exists
/// only for the loosest attribution fallback on the collection sheet.
#[must_use]
pub fn is_within_day_range(date: NaiveDate, target: NaiveDate, window: i64) -> bool {
    day_distance(date, target) <= window
}
