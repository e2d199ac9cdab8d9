//! EventDispatcher: synchronous fan-out of progress notifications.

use std::sync::Arc;

use super::handler::EddyEventHandler;
use super::types::*;

/// Synchronous dispatcher wrapping a list of handlers.
///
/// With no handlers registered, every `emit_*` is an empty loop.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EddyEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    pub fn register(&mut self, handler: Arc<dyn EddyEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver to every handler. A panicking handler is logged and skipped;
    /// the remaining handlers still receive the notification.
    fn emit<F: Fn(&dyn EddyEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("progress handler panicked; continuing");
            }
        }
    }

    // ---- Discovery ----
    pub fn emit_candidates_enumerated(&self, event: &CandidatesEnumeratedEvent) {
        self.emit(|h| h.on_candidates_enumerated(event));
    }

    pub fn emit_candidates_scored(&self, event: &CandidatesScoredEvent) {
        self.emit(|h| h.on_candidates_scored(event));
    }

    // ---- Materialization ----
    pub fn emit_definition_started(&self, event: &DefinitionStartedEvent) {
        self.emit(|h| h.on_definition_started(event));
    }

    pub fn emit_batch_committed(&self, event: &BatchCommittedEvent) {
        self.emit(|h| h.on_batch_committed(event));
    }

    pub fn emit_definition_complete(&self, event: &DefinitionCompleteEvent) {
        self.emit(|h| h.on_definition_complete(event));
    }

    pub fn emit_materialization_error(&self, event: &MaterializationErrorEvent) {
        self.emit(|h| h.on_materialization_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
