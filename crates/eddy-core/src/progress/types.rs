//! Payload types for progress notifications.

use crate::types::{CandidateShape, CandidateTriple};

/// Payload for `on_candidates_enumerated`.
#[derive(Debug, Clone)]
pub struct CandidatesEnumeratedEvent {
    pub shape: CandidateShape,
    pub count: usize,
}

/// Payload for `on_candidates_scored`.
#[derive(Debug, Clone)]
pub struct CandidatesScoredEvent {
    pub shape: CandidateShape,
    pub accepted: usize,
    pub rejected: usize,
}

/// Payload for `on_definition_started`.
#[derive(Debug, Clone)]
pub struct DefinitionStartedEvent {
    pub index: usize,
    pub total: usize,
    pub definition: CandidateTriple,
    pub expected_rows: u64,
}

/// Payload for `on_batch_committed`.
#[derive(Debug, Clone)]
pub struct BatchCommittedEvent {
    pub index: usize,
    /// 1-based batch number within the definition.
    pub batch: usize,
    pub rows_in_batch: usize,
    pub rows_so_far: u64,
}

/// Payload for `on_definition_complete`.
#[derive(Debug, Clone)]
pub struct DefinitionCompleteEvent {
    pub index: usize,
    pub rows: u64,
    pub activities_created: usize,
    pub batches_committed: usize,
}

/// Payload for `on_materialization_error`.
#[derive(Debug, Clone)]
pub struct MaterializationErrorEvent {
    pub index: usize,
    pub error_code: &'static str,
    pub message: String,
}
