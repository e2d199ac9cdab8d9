//! Schema metadata errors.

use super::error_code::{self, EddyErrorCode};
use crate::types::{AttributeId, ClassId, RelationshipTypeId};

/// A referenced schema element is absent from the store's metadata.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Unknown class name: {name}")]
    UnknownClass { name: String },

    #[error("Class {class_id} is not declared")]
    MissingClass { class_id: ClassId },

    #[error("Attribute {attribute_id} is not declared")]
    MissingAttribute { attribute_id: AttributeId },

    #[error("Relationship type {relationship_id} is not declared")]
    MissingRelationshipType { relationship_id: RelationshipTypeId },
}

impl EddyErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        error_code::SCHEMA_ERROR
    }
}
