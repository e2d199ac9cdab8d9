//! Declared schema metadata of a meta-model store.
//!
//! The catalog is the only input candidate enumeration depends on, so every
//! collection is kept sorted by id to make enumeration order reproducible.

use serde::{Deserialize, Serialize};

use super::identifiers::{AttributeId, ClassId, RelationshipTypeId};
use crate::constants::TIMESTAMP_TYPE;

/// A `class` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: ClassId,
    pub name: String,
}

/// An `attribute_name` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub id: AttributeId,
    pub class_id: ClassId,
    pub name: String,
    /// Declared value type (`timestamp`, `string`, `integer`, ...).
    pub data_type: String,
}

impl AttributeInfo {
    pub fn is_timestamp(&self) -> bool {
        self.data_type.eq_ignore_ascii_case(TIMESTAMP_TYPE)
    }
}

/// A `relationship` row: relations of this type go from an object version of
/// `source_class` to an object version of `target_class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipTypeInfo {
    pub id: RelationshipTypeId,
    pub name: String,
    pub source_class: ClassId,
    pub target_class: ClassId,
}

/// An attribute known to hold timestamp values, with its owning class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimestampAttribute {
    pub id: AttributeId,
    pub name: String,
    pub class_id: ClassId,
}

impl From<&AttributeInfo> for TimestampAttribute {
    fn from(attr: &AttributeInfo) -> Self {
        Self {
            id: attr.id,
            name: attr.name.clone(),
            class_id: attr.class_id,
        }
    }
}

/// Classes, attributes, and relationship types of one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    classes: Vec<ClassInfo>,
    attributes: Vec<AttributeInfo>,
    relationships: Vec<RelationshipTypeInfo>,
}

impl SchemaCatalog {
    /// Build a catalog; inputs are sorted by id.
    pub fn new(
        mut classes: Vec<ClassInfo>,
        mut attributes: Vec<AttributeInfo>,
        mut relationships: Vec<RelationshipTypeInfo>,
    ) -> Self {
        classes.sort_by_key(|c| c.id);
        attributes.sort_by_key(|a| a.id);
        relationships.sort_by_key(|r| r.id);
        Self {
            classes,
            attributes,
            relationships,
        }
    }

    pub fn classes(&self) -> &[ClassInfo] {
        &self.classes
    }

    pub fn attributes(&self) -> &[AttributeInfo] {
        &self.attributes
    }

    pub fn relationships(&self) -> &[RelationshipTypeInfo] {
        &self.relationships
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassInfo> {
        self.classes
            .binary_search_by_key(&id, |c| c.id)
            .ok()
            .map(|i| &self.classes[i])
    }

    pub fn class_by_name(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&AttributeInfo> {
        self.attributes
            .binary_search_by_key(&id, |a| a.id)
            .ok()
            .map(|i| &self.attributes[i])
    }

    pub fn relationship(&self, id: RelationshipTypeId) -> Option<&RelationshipTypeInfo> {
        self.relationships
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|i| &self.relationships[i])
    }

    /// Attributes declared on `class_id`, in id order.
    pub fn attributes_of(&self, class_id: ClassId) -> impl Iterator<Item = &AttributeInfo> {
        self.attributes.iter().filter(move |a| a.class_id == class_id)
    }

    /// Relationship types whose source class is `class_id`, in id order.
    pub fn relationships_from(
        &self,
        class_id: ClassId,
    ) -> impl Iterator<Item = &RelationshipTypeInfo> {
        self.relationships
            .iter()
            .filter(move |r| r.source_class == class_id)
    }
}
