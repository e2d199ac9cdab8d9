//! Event discovery and materialization.
//!
//! Discovery enumerates candidate event definitions from a store's schema
//! catalog and optionally filters them through a [`CandidateScorer`].
//! Materialization turns accepted definitions into activity, activity
//! instance, event, and event-link rows, committed in batches.
//!
//! [`CandidateScorer`]: eddy_core::traits::CandidateScorer

pub mod discovery;
pub mod dump;
pub mod enumerator;
pub mod materializer;
pub mod timestamp;

pub use discovery::{discover_event_definitions, discover_with_dispatcher, DiscoveryOutcome};
pub use enumerator::CandidateEnumerator;
pub use materializer::{DefinitionReport, EventMaterializer, MaterializationReport};
pub use timestamp::ChronoNormalizer;
