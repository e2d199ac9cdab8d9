//! SqlitePlanner: candidate definitions to meta-model read queries.
//!
//! Every query selects `(ov_id, ts_v, an_v)`: the object version the event is
//! linked to, the raw timestamp text, and the raw activity name. It also
//! selects `k1..k4`, the ids of the joined rows, which the store orders and
//! pages by.

use eddy_core::traits::QueryPlanner;
use eddy_core::types::{CandidateEventDefinition, ReadQuery};

/// Timestamp values of one attribute; the attribute's own name is the
/// activity name.
const TS_FIELD_SQL: &str = "\
SELECT ov.id AS ov_id, ts_av.value AS ts_v, an.name AS an_v,
       ov.id AS k1, ts_av.id AS k2, 0 AS k3, 0 AS k4
FROM object_version ov
JOIN attribute_value ts_av
  ON ts_av.object_version_id = ov.id AND ts_av.attribute_name_id = ?1
JOIN attribute_name an
  ON an.id = ?1";

/// Timestamp and identifier values on the same object version.
const IN_TABLE_SQL: &str = "\
SELECT ov.id AS ov_id, ts_av.value AS ts_v, an_av.value AS an_v,
       ov.id AS k1, ts_av.id AS k2, an_av.id AS k3, 0 AS k4
FROM object_version ov
JOIN attribute_value ts_av
  ON ts_av.object_version_id = ov.id AND ts_av.attribute_name_id = ?1
JOIN attribute_value an_av
  ON an_av.object_version_id = ov.id AND an_av.attribute_name_id = ?2";

/// Timestamp on the relation's source object version, identifier on its
/// target. The direction is fixed: a relation pointing the other way does
/// not match.
const LOOKUP_SQL: &str = "\
SELECT ov_ts.id AS ov_id, ts_av.value AS ts_v, an_av.value AS an_v,
       ov_ts.id AS k1, ts_av.id AS k2, rel.id AS k3, an_av.id AS k4
FROM object_version ov_ts
JOIN attribute_value ts_av
  ON ts_av.object_version_id = ov_ts.id AND ts_av.attribute_name_id = ?1
JOIN relation rel
  ON rel.source_object_version_id = ov_ts.id AND rel.relationship_id = ?3
JOIN object_version ov_an
  ON ov_an.id = rel.target_object_version_id
JOIN attribute_value an_av
  ON an_av.object_version_id = ov_an.id AND an_av.attribute_name_id = ?2";

/// Plans queries against the SQLite meta-model schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlitePlanner;

impl QueryPlanner for SqlitePlanner {
    fn plan_definition(&self, definition: &CandidateEventDefinition) -> ReadQuery {
        let (sql, params) = match *definition {
            CandidateEventDefinition::TimestampField { timestamp } => {
                (TS_FIELD_SQL, vec![timestamp.get()])
            }
            CandidateEventDefinition::InTable {
                timestamp,
                identifier,
            } => (IN_TABLE_SQL, vec![timestamp.get(), identifier.get()]),
            CandidateEventDefinition::Lookup {
                timestamp,
                identifier,
                relationship,
            } => (
                LOOKUP_SQL,
                vec![timestamp.get(), identifier.get(), relationship.get()],
            ),
        };
        ReadQuery {
            shape: definition.shape(),
            sql: sql.to_string(),
            params,
        }
    }
}
