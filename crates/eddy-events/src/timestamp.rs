//! ChronoNormalizer: the default [`DateNormalizer`].
//!
//! Accepted inputs, tried in order:
//! - 13-digit epoch milliseconds (`1704103200000`)
//! - 10-digit epoch seconds (`1704103200`)
//! - RFC 3339 (`2024-01-01T10:00:00Z`, `2024-01-01T12:00:00+02:00`)
//! - RFC 2822 (`Mon, 01 Jan 2024 10:00:00 +0000`)
//! - naive date-times, read as UTC (`2024-01-01 10:00:00.250`,
//!   `2024-01-01T10:00`, `2024/01/01 10:00:00`, `01-01-2024 10:00:00`)
//! - bare dates, read as UTC midnight (`2024-01-01`)

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use eddy_core::errors::TimestampParseError;
use eddy_core::traits::DateNormalizer;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

const EPOCH_MILLIS_DIGITS: usize = 13;
const EPOCH_SECONDS_DIGITS: usize = 10;

/// Parses timestamp text with `chrono`. Unrecognized text is an error, never
/// a guess.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoNormalizer;

impl DateNormalizer for ChronoNormalizer {
    fn parse_millis(&self, text: &str) -> Result<i64, TimestampParseError> {
        let value = text.trim();
        if value.is_empty() {
            return Err(unrecognized(text));
        }

        if value.bytes().all(|b| b.is_ascii_digit()) {
            return parse_epoch(value);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Ok(dt.timestamp_millis());
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
            return Ok(dt.timestamp_millis());
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Ok(naive.and_utc().timestamp_millis());
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc().timestamp_millis());
            }
        }

        Err(unrecognized(text))
    }
}

/// Digit-only text is an epoch value only at the two unambiguous widths:
/// 13 digits of milliseconds or 10 digits of seconds. Any other width
/// (`20240101`, `0`) is rejected rather than read as a 1970 instant.
fn parse_epoch(value: &str) -> Result<i64, TimestampParseError> {
    let scale = match value.len() {
        EPOCH_MILLIS_DIGITS => 1,
        EPOCH_SECONDS_DIGITS => 1000,
        _ => return Err(unrecognized(value)),
    };
    let out_of_range = || TimestampParseError::OutOfRange {
        value: value.to_string(),
    };
    let millis = value
        .parse::<i64>()
        .ok()
        .and_then(|v| v.checked_mul(scale))
        .ok_or_else(out_of_range)?;
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(out_of_range)?;
    Ok(millis)
}

fn unrecognized(text: &str) -> TimestampParseError {
    TimestampParseError::Unrecognized {
        value: text.to_string(),
    }
}
