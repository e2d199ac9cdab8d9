//! Data types shared across the Eddy crates.

pub mod candidate;
pub mod collections;
pub mod identifiers;
pub mod query;
pub mod schema;

pub use candidate::{CandidateEventDefinition, CandidateShape, CandidateTriple, FeatureVector};
pub use collections::{FxHashMap, FxHashSet};
pub use identifiers::{
    ActivityId, ActivityInstanceId, AttributeId, ClassId, EventId, ObjectVersionId,
    RelationshipTypeId,
};
pub use query::{ReadQuery, RowKey, SourceRow};
pub use schema::{AttributeInfo, ClassInfo, RelationshipTypeInfo, SchemaCatalog, TimestampAttribute};
