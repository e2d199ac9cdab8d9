//! Timestamp normalization errors.

use super::error_code::{self, EddyErrorCode};

/// A raw timestamp value could not be normalized to epoch milliseconds.
#[derive(Debug, thiserror::Error)]
pub enum TimestampParseError {
    #[error("Unrecognized timestamp '{value}'")]
    Unrecognized { value: String },

    #[error("Timestamp '{value}' is out of range")]
    OutOfRange { value: String },

    #[error("Timestamp value is NULL")]
    Null,
}

impl EddyErrorCode for TimestampParseError {
    fn error_code(&self) -> &'static str {
        error_code::TIMESTAMP_PARSE_ERROR
    }
}
