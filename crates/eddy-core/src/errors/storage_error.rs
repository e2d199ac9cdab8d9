//! Store read/write errors.

use super::error_code::{self, EddyErrorCode};

/// Errors raised by the meta-model store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Migration to v{version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Database busy")]
    DbBusy,

    #[error("Transaction error: {message}")]
    Transaction { message: String },
}

impl EddyErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::DbBusy => error_code::DB_BUSY,
            Self::Transaction { .. } => error_code::TRANSACTION_ERROR,
        }
    }
}
