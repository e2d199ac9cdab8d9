//! Store location configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_READ_POOL_SIZE;

/// Where the meta-model is read from and where the event log is written.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file holding the meta-model. None = in-memory.
    pub source_path: Option<PathBuf>,
    /// Separate SQLite file receiving the event log. None = write to source.
    pub target_path: Option<PathBuf>,
    /// Read-only connections per file-backed store. Default: 4.
    pub read_pool_size: Option<usize>,
}

impl StorageConfig {
    /// Returns the effective read pool size, defaulting to 4.
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size.unwrap_or(DEFAULT_READ_POOL_SIZE)
    }
}
