//! SQLite persistence for Eddy: the meta-model read side and the event-log
//! write side.

pub mod connection;
pub mod migrations;
pub mod planner;
pub mod queries;
pub mod store;

pub use connection::transaction::SqliteEventLogTransaction;
pub use connection::MetaModelDb;
pub use planner::SqlitePlanner;
pub use store::StorePair;

use eddy_core::errors::StorageError;

/// Map a rusqlite error into a `StorageError`, keeping busy/locked distinct.
pub(crate) fn to_storage_err(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
            StorageError::DbBusy
        }
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}
