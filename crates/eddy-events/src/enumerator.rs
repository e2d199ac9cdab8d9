//! CandidateEnumerator: candidate event definitions from declared schema.
//!
//! Enumeration reads only the schema catalog, never row contents, so the
//! output for an unchanged schema is identical from run to run.

use eddy_core::errors::SchemaError;
use eddy_core::types::{
    CandidateEventDefinition, CandidateShape, ClassId, FxHashSet, SchemaCatalog,
    TimestampAttribute,
};

/// Enumerates candidates over one store's schema catalog.
#[derive(Debug, Clone, Copy)]
pub struct CandidateEnumerator<'a> {
    catalog: &'a SchemaCatalog,
}

impl<'a> CandidateEnumerator<'a> {
    pub fn new(catalog: &'a SchemaCatalog) -> Self {
        Self { catalog }
    }

    /// Attributes declared with the timestamp type, in attribute id order.
    ///
    /// A non-empty `classes` restricts the result to those class names.
    pub fn timestamp_attributes(
        &self,
        classes: &[String],
    ) -> Result<Vec<TimestampAttribute>, SchemaError> {
        let filter = if classes.is_empty() {
            None
        } else {
            let mut ids = FxHashSet::default();
            for name in classes {
                let class = self
                    .catalog
                    .class_by_name(name)
                    .ok_or_else(|| SchemaError::UnknownClass { name: name.clone() })?;
                ids.insert(class.id);
            }
            Some(ids)
        };

        Ok(self
            .catalog
            .attributes()
            .iter()
            .filter(|a| a.is_timestamp())
            .filter(|a| filter.as_ref().map_or(true, |ids| ids.contains(&a.class_id)))
            .map(TimestampAttribute::from)
            .collect())
    }

    /// Candidates of one shape for the given timestamp attributes, grouped by
    /// timestamp attribute in input order.
    pub fn enumerate(
        &self,
        timestamps: &[TimestampAttribute],
        shape: CandidateShape,
    ) -> Result<Vec<CandidateEventDefinition>, SchemaError> {
        let mut candidates = Vec::new();
        for ts in timestamps {
            self.check_declared(ts)?;
            match shape {
                CandidateShape::TsField => {
                    candidates.push(CandidateEventDefinition::TimestampField { timestamp: ts.id });
                }
                CandidateShape::InTable => self.push_in_table(ts, &mut candidates),
                CandidateShape::Lookup => self.push_lookup(ts, &mut candidates)?,
            }
        }
        tracing::debug!(shape = %shape, count = candidates.len(), "enumerated candidates");
        Ok(candidates)
    }

    fn check_declared(&self, ts: &TimestampAttribute) -> Result<(), SchemaError> {
        if self.catalog.attribute(ts.id).is_none() {
            return Err(SchemaError::MissingAttribute { attribute_id: ts.id });
        }
        self.require_class(ts.class_id)
    }

    fn require_class(&self, class_id: ClassId) -> Result<(), SchemaError> {
        match self.catalog.class(class_id) {
            Some(_) => Ok(()),
            None => Err(SchemaError::MissingClass { class_id }),
        }
    }

    fn push_in_table(&self, ts: &TimestampAttribute, out: &mut Vec<CandidateEventDefinition>) {
        out.extend(
            self.catalog
                .attributes_of(ts.class_id)
                .filter(|a| a.id != ts.id)
                .map(|a| CandidateEventDefinition::InTable {
                    timestamp: ts.id,
                    identifier: a.id,
                }),
        );
    }

    fn push_lookup(
        &self,
        ts: &TimestampAttribute,
        out: &mut Vec<CandidateEventDefinition>,
    ) -> Result<(), SchemaError> {
        for rel in self.catalog.relationships_from(ts.class_id) {
            self.require_class(rel.target_class)?;
            out.extend(self.catalog.attributes_of(rel.target_class).map(|a| {
                CandidateEventDefinition::Lookup {
                    timestamp: ts.id,
                    identifier: a.id,
                    relationship: rel.id,
                }
            }));
        }
        Ok(())
    }
}
