//! Fixed-format timestamps used by the export and report queries, and the
//! time-of-day greeting for the main page.

use chrono::{NaiveDateTime, Timelike};

use crate::error::Error;

/// Date-time format used by the statement export and page requests.
pub const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Short date format accepted by report queries.
pub const DATE_FORMAT: &str = "%Y.%m.%d";

/// Parse a timestamp like "15.05.2023 14:30:00".
pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT).map_err(|_| {
        Error::Parse(format!(
            "invalid date-time '{raw}', expected {DATETIME_FORMAT}"
        ))
    })
}

/// Greeting for the hour of `now`, given as "DD.MM.YYYY HH:MM:SS".
///
/// A malformed timestamp is the caller's mistake and is surfaced as an error.
pub fn greeting(now: &str) -> Result<&'static str, Error> {
    let parsed = parse_datetime(now)?;
    Ok(greeting_for_hour(parsed.hour()))
}

/// 6-11 morning, 12-16 afternoon, 17-22 evening, otherwise night.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        6..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=22 => "Good evening",
        _ => "Good night",
    }
}
