//! Store capabilities: `MetaModelDb` as reader and writer, and the
//! source/target pairing used by materialization runs.

use std::sync::Arc;

use eddy_core::config::StorageConfig;
use eddy_core::errors::StorageError;
use eddy_core::traits::{EventLogTransaction, EventLogWriter, MetaModelReader};
use eddy_core::types::{ReadQuery, RowKey, SchemaCatalog, SourceRow};

use crate::connection::MetaModelDb;
use crate::queries::{schema, source_rows};

impl MetaModelReader for MetaModelDb {
    fn schema_catalog(&self) -> Result<SchemaCatalog, StorageError> {
        self.with_reader(schema::load_catalog)
    }

    fn count_rows(&self, query: &ReadQuery) -> Result<u64, StorageError> {
        self.with_reader(|conn| source_rows::count_rows(conn, query))
    }

    fn fetch_rows(
        &self,
        query: &ReadQuery,
        after: RowKey,
        limit: usize,
    ) -> Result<Vec<SourceRow>, StorageError> {
        self.with_reader(|conn| source_rows::fetch_rows(conn, query, after, limit))
    }
}

impl EventLogWriter for MetaModelDb {
    fn begin(&self) -> Result<Box<dyn EventLogTransaction + '_>, StorageError> {
        Ok(Box::new(self.begin_transaction()?))
    }
}

/// The meta-model source and the store receiving the event log.
///
/// With no separate target, both handles are the same store. Event-log ids
/// are allocated in the target; linked object-version ids come from the
/// source.
#[derive(Clone)]
pub struct StorePair {
    source: Arc<MetaModelDb>,
    target: Option<Arc<MetaModelDb>>,
}

impl StorePair {
    /// Read and write the same store.
    pub fn single(store: Arc<MetaModelDb>) -> Self {
        Self {
            source: store,
            target: None,
        }
    }

    /// Read from `source`, write the event log to `target`.
    pub fn split(source: Arc<MetaModelDb>, target: Arc<MetaModelDb>) -> Self {
        Self {
            source,
            target: Some(target),
        }
    }

    /// Open the stores named by `config`. A missing source path opens an
    /// in-memory store.
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let pool_size = config.effective_read_pool_size();
        let source = match &config.source_path {
            Some(path) => MetaModelDb::open_with_pool_size(path, pool_size)?,
            None => MetaModelDb::open_in_memory()?,
        };
        let target = match &config.target_path {
            Some(path) => Some(Arc::new(MetaModelDb::open_with_pool_size(path, pool_size)?)),
            None => None,
        };
        Ok(Self {
            source: Arc::new(source),
            target,
        })
    }

    pub fn reader(&self) -> &MetaModelDb {
        &self.source
    }

    pub fn writer(&self) -> &MetaModelDb {
        self.target.as_deref().unwrap_or(&self.source)
    }

    /// True when the event log goes to a different store than the source.
    pub fn is_split(&self) -> bool {
        self.target.is_some()
    }
}
