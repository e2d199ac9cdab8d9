//! Candidate event definitions and their three structural shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::identifiers::{AttributeId, RelationshipTypeId};
use crate::errors::{ConfigError, DefinitionError};

/// The join strategy a candidate uses to find its activity name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateShape {
    /// The timestamp attribute's own name is the activity name.
    TsField,
    /// The activity name is another attribute of the same object version.
    InTable,
    /// The activity name lives on a related object version.
    Lookup,
}

impl CandidateShape {
    /// All shapes in enumeration order.
    pub const ALL: [CandidateShape; 3] = [Self::TsField, Self::InTable, Self::Lookup];

    /// Stable lowercase name, used in dump file names and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TsField => "ts_field",
            Self::InTable => "in_table",
            Self::Lookup => "lookup",
        }
    }
}

impl fmt::Display for CandidateShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ts_field" => Ok(Self::TsField),
            "in_table" => Ok(Self::InTable),
            "lookup" => Ok(Self::Lookup),
            other => Err(ConfigError::InvalidValue {
                field: "discovery.shapes".to_string(),
                message: format!("unknown candidate shape '{other}'"),
            }),
        }
    }
}

/// A proposed rule for deriving events from the meta-model store.
///
/// The variant fixes which identifiers are present, so a relationship type
/// without an identifier attribute cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "CandidateTriple", try_from = "CandidateTriple")]
pub enum CandidateEventDefinition {
    TimestampField {
        timestamp: AttributeId,
    },
    InTable {
        timestamp: AttributeId,
        identifier: AttributeId,
    },
    Lookup {
        timestamp: AttributeId,
        identifier: AttributeId,
        relationship: RelationshipTypeId,
    },
}

impl CandidateEventDefinition {
    pub fn shape(&self) -> CandidateShape {
        match self {
            Self::TimestampField { .. } => CandidateShape::TsField,
            Self::InTable { .. } => CandidateShape::InTable,
            Self::Lookup { .. } => CandidateShape::Lookup,
        }
    }

    pub fn timestamp_attribute(&self) -> AttributeId {
        match *self {
            Self::TimestampField { timestamp }
            | Self::InTable { timestamp, .. }
            | Self::Lookup { timestamp, .. } => timestamp,
        }
    }

    pub fn identifier_attribute(&self) -> Option<AttributeId> {
        match *self {
            Self::TimestampField { .. } => None,
            Self::InTable { identifier, .. } | Self::Lookup { identifier, .. } => Some(identifier),
        }
    }

    pub fn relationship_type(&self) -> Option<RelationshipTypeId> {
        match *self {
            Self::Lookup { relationship, .. } => Some(relationship),
            _ => None,
        }
    }

    /// The optional-field form used on the wire and in dumps.
    pub fn to_triple(&self) -> CandidateTriple {
        CandidateTriple {
            timestamp_attribute_id: Some(self.timestamp_attribute()),
            activity_identifier_attribute_id: self.identifier_attribute(),
            relationship_type_id: self.relationship_type(),
        }
    }
}

impl fmt::Display for CandidateEventDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.shape(), self.to_triple())
    }
}

/// Wire form of a candidate: three independently optional identifiers.
///
/// External input (dumps, callers) arrives in this form and is validated when
/// converted into a [`CandidateEventDefinition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CandidateTriple {
    pub timestamp_attribute_id: Option<AttributeId>,
    pub activity_identifier_attribute_id: Option<AttributeId>,
    pub relationship_type_id: Option<RelationshipTypeId>,
}

impl CandidateTriple {
    pub fn new(
        timestamp: Option<AttributeId>,
        identifier: Option<AttributeId>,
        relationship: Option<RelationshipTypeId>,
    ) -> Self {
        Self {
            timestamp_attribute_id: timestamp,
            activity_identifier_attribute_id: identifier,
            relationship_type_id: relationship,
        }
    }
}

impl fmt::Display for CandidateTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt<T: fmt::Display>(v: Option<T>) -> String {
            v.map_or_else(|| "-".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "(ts={}, id={}, rel={})",
            opt(self.timestamp_attribute_id),
            opt(self.activity_identifier_attribute_id),
            opt(self.relationship_type_id)
        )
    }
}

impl From<CandidateEventDefinition> for CandidateTriple {
    fn from(definition: CandidateEventDefinition) -> Self {
        definition.to_triple()
    }
}

impl TryFrom<CandidateTriple> for CandidateEventDefinition {
    type Error = DefinitionError;

    fn try_from(triple: CandidateTriple) -> Result<Self, Self::Error> {
        let timestamp = triple
            .timestamp_attribute_id
            .ok_or(DefinitionError::MissingTimestamp { definition: triple })?;
        match (triple.activity_identifier_attribute_id, triple.relationship_type_id) {
            (None, None) => Ok(Self::TimestampField { timestamp }),
            (Some(identifier), None) => Ok(Self::InTable {
                timestamp,
                identifier,
            }),
            (Some(identifier), Some(relationship)) => Ok(Self::Lookup {
                timestamp,
                identifier,
                relationship,
            }),
            (None, Some(_)) => {
                Err(DefinitionError::RelationshipWithoutIdentifier { definition: triple })
            }
        }
    }
}

/// Scorer input for one candidate. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(pub Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_names_round_trip_through_from_str() {
        for shape in CandidateShape::ALL {
            assert_eq!(shape.as_str().parse::<CandidateShape>().unwrap(), shape);
        }
        assert!("sideways".parse::<CandidateShape>().is_err());
    }

    #[test]
    fn relationship_without_identifier_is_rejected() {
        let triple = CandidateTriple::new(Some(AttributeId(1)), None, Some(RelationshipTypeId(2)));
        assert!(matches!(
            CandidateEventDefinition::try_from(triple),
            Err(DefinitionError::RelationshipWithoutIdentifier { .. })
        ));
    }
}
