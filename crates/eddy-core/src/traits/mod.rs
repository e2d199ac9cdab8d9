//! Capability boundaries: the store, the query planner, the scorer, and date
//! normalization. The engine depends only on these traits.

pub mod date_normalizer;
pub mod event_log;
pub mod meta_model;
pub mod scorer;

pub use date_normalizer::DateNormalizer;
pub use event_log::{EventLogTransaction, EventLogWriter};
pub use meta_model::{MetaModelReader, QueryPlanner};
pub use scorer::CandidateScorer;
