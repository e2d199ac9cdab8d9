//! Invalid candidate definitions.

use super::error_code::{self, EddyErrorCode};
use crate::types::CandidateTriple;

/// A candidate definition that can never be materialized.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("Without a timestamp attribute no events can be created: {definition}")]
    MissingTimestamp { definition: CandidateTriple },

    #[error("Relationship type given without an activity identifier attribute: {definition}")]
    RelationshipWithoutIdentifier { definition: CandidateTriple },

    #[error("No query could be planned for: {definition}")]
    NoQuery { definition: CandidateTriple },
}

impl EddyErrorCode for DefinitionError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_DEFINITION
    }
}
