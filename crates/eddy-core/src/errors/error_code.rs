//! EddyErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that callers can match on without parsing messages.
pub trait EddyErrorCode {
    /// Returns the error code string (e.g., "SCHEMA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const INVALID_DEFINITION: &str = "INVALID_DEFINITION";
pub const TIMESTAMP_PARSE_ERROR: &str = "TIMESTAMP_PARSE_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const TRANSACTION_ERROR: &str = "TRANSACTION_ERROR";
pub const SCORING_ERROR: &str = "SCORING_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DUMP_ERROR: &str = "DUMP_ERROR";
pub const INVALID_ROW: &str = "INVALID_ROW";
