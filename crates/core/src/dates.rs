//! Accepted date grammar for client-supplied timestamps.
//!
//! Clients submit date fields as strings. A value is well formed when it is a
//! plain calendar date (`YYYY-MM-DD`) or an ISO date-time with minutes,
//! seconds or fractional seconds, optionally carrying a UTC offset. Anything
//! else is a field-format conflict reported against the raw value.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date-time formats accepted without an explicit offset.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses a client-supplied date string under the accepted grammar.
///
/// Offset-bearing inputs are normalised to UTC before the naive value is
/// returned. Returns `None` when the input matches no accepted format or
/// names an impossible calendar date.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    // chrono accepts non-zero-padded numerics; the grammar requires the
    // strict `YYYY-MM-DD` prefix.
    if !has_strict_date_prefix(input) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn has_strict_date_prefix(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() >= 10
        && bytes[0..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit)
}

/// Returns true if `input` parses under the accepted date grammar.
pub fn date_is_valid(input: &str) -> bool {
    parse_date(input).is_some()
}

/// Truncates a date-time to day granularity.
pub fn truncate_to_day(value: NaiveDateTime) -> NaiveDate {
    value.date()
}
