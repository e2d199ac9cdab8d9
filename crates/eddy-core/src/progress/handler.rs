//! EddyEventHandler trait with no-op defaults.

use super::types::*;

/// Trait for observing discovery and materialization progress.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the notifications they care about.
pub trait EddyEventHandler: Send + Sync {
    // ---- Discovery ----
    fn on_candidates_enumerated(&self, _event: &CandidatesEnumeratedEvent) {}
    fn on_candidates_scored(&self, _event: &CandidatesScoredEvent) {}

    // ---- Materialization ----
    fn on_definition_started(&self, _event: &DefinitionStartedEvent) {}
    fn on_batch_committed(&self, _event: &BatchCommittedEvent) {}
    fn on_definition_complete(&self, _event: &DefinitionCompleteEvent) {}
    fn on_materialization_error(&self, _event: &MaterializationErrorEvent) {}
}
