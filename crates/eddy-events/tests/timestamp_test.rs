//! ChronoNormalizer accepted formats and failures.

use eddy_core::errors::TimestampParseError;
use eddy_core::traits::DateNormalizer;
use eddy_events::ChronoNormalizer;

const JAN_1_2024_10H: i64 = 1_704_103_200_000;

fn parse(text: &str) -> Result<i64, TimestampParseError> {
    ChronoNormalizer.parse_millis(text)
}

#[test]
fn rfc3339_utc() {
    assert_eq!(parse("2024-01-01T10:00:00Z").unwrap(), JAN_1_2024_10H);
}

#[test]
fn rfc3339_with_offset_is_converted_to_utc() {
    assert_eq!(parse("2024-01-01T12:00:00+02:00").unwrap(), JAN_1_2024_10H);
}

#[test]
fn rfc3339_keeps_milliseconds() {
    assert_eq!(parse("2024-01-01T10:00:00.250Z").unwrap(), JAN_1_2024_10H + 250);
}

#[test]
fn rfc2822() {
    assert_eq!(parse("Mon, 01 Jan 2024 10:00:00 +0000").unwrap(), JAN_1_2024_10H);
}

#[test]
fn naive_datetimes_are_utc() {
    for text in [
        "2024-01-01 10:00:00",
        "2024-01-01T10:00:00",
        "2024-01-01 10:00",
        "2024-01-01T10:00",
        "2024/01/01 10:00:00",
        "01-01-2024 10:00:00",
    ] {
        assert_eq!(parse(text).unwrap(), JAN_1_2024_10H, "{text}");
    }
    assert_eq!(parse("2024-01-01 10:00:00.5").unwrap(), JAN_1_2024_10H + 500);
}

#[test]
fn bare_date_is_utc_midnight() {
    assert_eq!(parse("2024-01-01").unwrap(), JAN_1_2024_10H - 10 * 3_600_000);
}

#[test]
fn thirteen_digits_are_epoch_millis() {
    assert_eq!(parse("1704103200000").unwrap(), JAN_1_2024_10H);
    assert_eq!(parse("0000000000000").unwrap(), 0);
}

#[test]
fn ten_digits_are_epoch_seconds() {
    assert_eq!(parse("1704103200").unwrap(), JAN_1_2024_10H);
}

#[test]
fn digit_strings_of_other_widths_are_rejected() {
    for text in ["20240101", "0", "42", "170410320000", "17041032000000", "-1000"] {
        assert!(
            matches!(parse(text), Err(TimestampParseError::Unrecognized { .. })),
            "{text:?} must not be read as an epoch value"
        );
    }
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(parse("  2024-01-01T10:00:00Z\n").unwrap(), JAN_1_2024_10H);
}

#[test]
fn unrecognized_text_fails_loudly() {
    for text in ["", "   ", "yesterday", "2024-13-01", "10:00:00", "2024-01-01T25:00:00Z"] {
        assert!(
            matches!(parse(text), Err(TimestampParseError::Unrecognized { .. })),
            "{text:?} should be rejected"
        );
    }
}
