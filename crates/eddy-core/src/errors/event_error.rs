//! Top-level error for discovery and materialization runs.

use super::error_code::{self, EddyErrorCode};
use super::{
    ConfigError, DefinitionError, DumpError, SchemaError, ScoringError, StorageError,
    TimestampParseError,
};
use crate::types::{CandidateTriple, ObjectVersionId};

/// Errors surfaced by the enumeration and materialization entry points.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid definition: {0}")]
    InvalidDefinition(#[from] DefinitionError),

    #[error("Timestamp parse error: {0}")]
    TimestampParse(#[from] TimestampParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dump error: {0}")]
    Dump(#[from] DumpError),

    #[error("Invalid row for object version {object_version_id}: {message}")]
    InvalidRow {
        object_version_id: ObjectVersionId,
        message: String,
    },

    /// A failure while materializing one definition. `row` is the 1-based
    /// position of the offending row, when the failure is row-specific.
    #[error("Materializing definition #{index} {definition} failed{}: {source}",
        .row.map(|r| format!(" at row {r}")).unwrap_or_default())]
    Materialization {
        index: usize,
        definition: CandidateTriple,
        row: Option<u64>,
        #[source]
        source: Box<EventError>,
    },
}

impl EventError {
    /// The innermost error, skipping materialization context.
    pub fn root_cause(&self) -> &EventError {
        match self {
            Self::Materialization { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl EddyErrorCode for EventError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Schema(e) => e.error_code(),
            Self::InvalidDefinition(e) => e.error_code(),
            Self::TimestampParse(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Scoring(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Dump(e) => e.error_code(),
            Self::InvalidRow { .. } => error_code::INVALID_ROW,
            Self::Materialization { source, .. } => source.error_code(),
        }
    }
}
