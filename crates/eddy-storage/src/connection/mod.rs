//! Connection management: write-serialized + read-pooled.

pub mod pool;
pub mod pragmas;
pub mod transaction;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use eddy_core::constants::DEFAULT_READ_POOL_SIZE;
use eddy_core::errors::StorageError;
use rusqlite::Connection;

use self::pool::ReadPool;
use self::pragmas::apply_pragmas;
use self::transaction::SqliteEventLogTransaction;
use crate::migrations;

/// One meta-model store: a single serialized write connection plus, for
/// file-backed databases, a pool of read-only connections.
///
/// In-memory databases route reads through the writer, since a second
/// in-memory connection would open a separate, empty database.
pub struct MetaModelDb {
    writer: Mutex<Connection>,
    readers: Option<ReadPool>,
    path: Option<PathBuf>,
}

impl MetaModelDb {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_pool_size(path, DEFAULT_READ_POOL_SIZE)
    }

    /// Open a file-backed database with `pool_size` read connections.
    pub fn open_with_pool_size(path: &Path, pool_size: usize) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(|e| StorageError::SqliteError {
            message: format!("open {}: {e}", path.display()),
        })?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, pool_size)?;
        tracing::debug!(path = %path.display(), readers = readers.size(), "opened meta-model store");

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Some(readers),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing and scratch runs).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(crate::to_storage_err)?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: None,
            path: None,
        })
    }

    /// Execute an operation on the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute a read operation on a pooled connection, or on the writer for
    /// in-memory databases.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        match &self.readers {
            Some(pool) => pool.with_conn(f),
            None => self.with_writer(f),
        }
    }

    /// Begin an IMMEDIATE write transaction for event-log inserts.
    pub fn begin_transaction(&self) -> Result<SqliteEventLogTransaction<'_>, StorageError> {
        SqliteEventLogTransaction::begin(self)
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
