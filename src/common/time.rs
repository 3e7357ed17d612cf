//! Time handling at the store boundary.
//!
//! The sensor store keeps UTC timestamps without an offset and the log store
//! keeps nanoseconds since the epoch. Users read and type local time.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// Format used by the dashboard forms (`d.m.Y H:i`).
pub const FORM_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Format used for timestamps in tables.
pub const TABLE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

const INPUT_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Half-open interval `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    #[must_use]
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// The `span` ending at `end`.
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, span: Duration) -> Self {
        Self {
            from: end - span,
            to: end,
        }
    }

    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from <= t && t < self.to
    }

    /// Window bounds in the sensor store's representation.
    #[must_use]
    pub fn naive_bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.from.naive_utc(), self.to.naive_utc())
    }

    /// Window bounds in the log store's representation.
    #[must_use]
    pub fn nanos_bounds(&self) -> (i64, i64) {
        (utc_to_nanos(self.from), utc_to_nanos(self.to))
    }
}

/// Parse a user supplied time bound, interpreting offset-less input in `tz`.
///
/// Accepts the form format, ISO-like local formats (with `T` or a space,
/// optional seconds), RFC 3339 and plain epoch seconds.
pub fn parse_local<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(secs) = input.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }

    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Render a UTC instant in `tz`.
pub fn format_local<Tz>(t: DateTime<Utc>, tz: &Tz, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    t.with_timezone(tz).format(format).to_string()
}

#[must_use]
pub fn nanos_to_utc(nanos: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(nanos)
}

/// Saturates outside the representable range (years 1677..2262).
#[must_use]
pub fn utc_to_nanos(t: DateTime<Utc>) -> i64 {
    t.timestamp_nanos_opt()
        .unwrap_or(if t.timestamp() < 0 { i64::MIN } else { i64::MAX })
}
