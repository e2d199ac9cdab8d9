//! Read side of the meta-model store.

use crate::errors::StorageError;
use crate::types::{
    CandidateEventDefinition, CandidateTriple, ReadQuery, RowKey, SchemaCatalog, SourceRow,
};

/// Read access to a meta-model store: schema introspection and execution of
/// planned queries.
pub trait MetaModelReader {
    /// Load declared classes, attributes, and relationship types.
    fn schema_catalog(&self) -> Result<SchemaCatalog, StorageError>;

    /// Number of rows `query` yields.
    fn count_rows(&self, query: &ReadQuery) -> Result<u64, StorageError>;

    /// Up to `limit` rows of `query` whose key sorts after `after`, in key
    /// order. Start with [`RowKey::START`] and pass the last row's key to get
    /// the next page.
    fn fetch_rows(
        &self,
        query: &ReadQuery,
        after: RowKey,
        limit: usize,
    ) -> Result<Vec<SourceRow>, StorageError>;
}

/// Translates candidate definitions into read queries.
pub trait QueryPlanner {
    /// Plan a query for a structurally valid definition.
    fn plan_definition(&self, definition: &CandidateEventDefinition) -> ReadQuery;

    /// Plan a query for a wire-form candidate. Returns `None` only when the
    /// triple does not describe a valid definition.
    fn plan(&self, candidate: &CandidateTriple) -> Option<ReadQuery> {
        CandidateEventDefinition::try_from(*candidate)
            .ok()
            .map(|definition| self.plan_definition(&definition))
    }
}
