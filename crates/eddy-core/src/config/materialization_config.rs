//! Materialization configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BATCH_SIZE;

/// Configuration for writing event-log rows.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MaterializationConfig {
    /// Rows per committed transaction. Default: 1000.
    pub batch_size: Option<usize>,
}

impl MaterializationConfig {
    /// Returns the effective batch size, defaulting to 1000.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }
}
