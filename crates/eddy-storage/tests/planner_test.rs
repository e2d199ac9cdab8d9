//! Query planner tests: join semantics of the three shapes, executed against
//! an in-memory store.

use eddy_core::traits::{MetaModelReader, QueryPlanner};
use eddy_core::types::*;
use eddy_storage::queries::meta_model as mm;
use eddy_storage::{MetaModelDb, SqlitePlanner};
use proptest::prelude::*;

/// order(created_at: timestamp, status: string) --placed_by--> customer(name: string)
struct Fixture {
    db: MetaModelDb,
    created_at: AttributeId,
    status: AttributeId,
    customer_name: AttributeId,
    placed_by: RelationshipTypeId,
}

fn fixture() -> Fixture {
    let db = MetaModelDb::open_in_memory().unwrap();
    let (created_at, status, customer_name, placed_by) = db
        .with_writer(|conn| {
            let order = mm::insert_class(conn, "order")?;
            let customer = mm::insert_class(conn, "customer")?;
            let created_at = mm::insert_attribute_name(conn, order, "created_at", "timestamp")?;
            let status = mm::insert_attribute_name(conn, order, "status", "string")?;
            let customer_name = mm::insert_attribute_name(conn, customer, "name", "string")?;
            let placed_by = mm::insert_relationship(conn, "placed_by", order, customer)?;
            Ok((created_at, status, customer_name, placed_by))
        })
        .unwrap();
    Fixture {
        db,
        created_at,
        status,
        customer_name,
        placed_by,
    }
}

impl Fixture {
    fn order(&self, ts: &str, status: &str) -> ObjectVersionId {
        self.db
            .with_writer(|conn| {
                let ov = mm::insert_object_version(conn, ClassId(1))?;
                mm::insert_attribute_value(conn, ov, self.created_at, Some(ts))?;
                mm::insert_attribute_value(conn, ov, self.status, Some(status))?;
                Ok(ov)
            })
            .unwrap()
    }

    fn customer(&self, name: &str) -> ObjectVersionId {
        self.db
            .with_writer(|conn| {
                let ov = mm::insert_object_version(conn, ClassId(2))?;
                mm::insert_attribute_value(conn, ov, self.customer_name, Some(name))?;
                Ok(ov)
            })
            .unwrap()
    }

    fn relate(&self, source: ObjectVersionId, target: ObjectVersionId) {
        self.db
            .with_writer(|conn| mm::insert_relation(conn, self.placed_by, source, target))
            .unwrap();
    }

    fn rows(&self, definition: CandidateEventDefinition) -> Vec<SourceRow> {
        let query = SqlitePlanner.plan_definition(&definition);
        let count = self.db.count_rows(&query).unwrap();
        let rows = self.db.fetch_rows(&query, RowKey::START, 10_000).unwrap();
        assert_eq!(count as usize, rows.len(), "count must agree with fetched rows");
        rows
    }
}

#[test]
fn ts_field_uses_the_attribute_name_as_activity() {
    let f = fixture();
    let o1 = f.order("2024-01-01T10:00:00Z", "open");
    let o2 = f.order("2024-01-02T10:00:00Z", "closed");

    let rows = f.rows(CandidateEventDefinition::TimestampField {
        timestamp: f.created_at,
    });

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].object_version_id, o1);
    assert_eq!(rows[1].object_version_id, o2);
    assert!(rows
        .iter()
        .all(|r| r.activity_name.as_deref() == Some("created_at")));
    assert_eq!(rows[0].timestamp_value.as_deref(), Some("2024-01-01T10:00:00Z"));
}

#[test]
fn in_table_pairs_values_of_the_same_object_version_only() {
    let f = fixture();
    let ovs: Vec<_> = (0..5)
        .map(|i| f.order(&format!("2024-01-0{}T00:00:00Z", i + 1), &format!("status-{i}")))
        .collect();

    let rows = f.rows(CandidateEventDefinition::InTable {
        timestamp: f.created_at,
        identifier: f.status,
    });

    assert_eq!(rows.len(), 5, "no cross-object combinations");
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.object_version_id, ovs[i]);
        assert_eq!(row.activity_name.as_deref(), Some(format!("status-{i}").as_str()));
        assert_eq!(
            row.timestamp_value.as_deref(),
            Some(format!("2024-01-0{}T00:00:00Z", i + 1).as_str())
        );
    }
}

#[test]
fn in_table_skips_object_versions_missing_the_identifier() {
    let f = fixture();
    f.order("2024-01-01T00:00:00Z", "open");
    let bare = f
        .db
        .with_writer(|conn| {
            let ov = mm::insert_object_version(conn, ClassId(1))?;
            mm::insert_attribute_value(conn, ov, f.created_at, Some("2024-02-01T00:00:00Z"))?;
            Ok(ov)
        })
        .unwrap();

    let rows = f.rows(CandidateEventDefinition::InTable {
        timestamp: f.created_at,
        identifier: f.status,
    });
    assert_eq!(rows.len(), 1);
    assert_ne!(rows[0].object_version_id, bare);
}

#[test]
fn lookup_follows_relations_from_timestamp_side_to_identifier_side() {
    let f = fixture();
    let order = f.order("2024-01-01T00:00:00Z", "open");
    let alice = f.customer("alice");
    f.relate(order, alice);

    let rows = f.rows(CandidateEventDefinition::Lookup {
        timestamp: f.created_at,
        identifier: f.customer_name,
        relationship: f.placed_by,
    });

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].object_version_id, order, "event links to the timestamp side");
    assert_eq!(rows[0].activity_name.as_deref(), Some("alice"));
}

/// The relation direction is a documented boundary: a relation stored from
/// identifier side to timestamp side is not matched in reverse.
#[test]
fn lookup_does_not_match_a_swapped_relation() {
    let f = fixture();
    let order = f.order("2024-01-01T00:00:00Z", "open");
    let bob = f.customer("bob");
    f.relate(bob, order);

    let rows = f.rows(CandidateEventDefinition::Lookup {
        timestamp: f.created_at,
        identifier: f.customer_name,
        relationship: f.placed_by,
    });

    assert!(rows.is_empty(), "swapped source/target must not match");
}

#[test]
fn lookup_requires_the_named_relationship_type() {
    let f = fixture();
    let order = f.order("2024-01-01T00:00:00Z", "open");
    let carol = f.customer("carol");
    f.relate(order, carol);

    let other = f
        .db
        .with_writer(|conn| mm::insert_relationship(conn, "billed_to", ClassId(1), ClassId(2)))
        .unwrap();

    let rows = f.rows(CandidateEventDefinition::Lookup {
        timestamp: f.created_at,
        identifier: f.customer_name,
        relationship: other,
    });
    assert!(rows.is_empty());
}

#[test]
fn paging_visits_every_row_once_in_order() {
    let f = fixture();
    let ovs: Vec<_> = (0..25)
        .map(|i| f.order("2024-01-01T00:00:00Z", &format!("s{i}")))
        .collect();
    let query = SqlitePlanner.plan_definition(&CandidateEventDefinition::InTable {
        timestamp: f.created_at,
        identifier: f.status,
    });

    let mut seen = Vec::new();
    let mut cursor = RowKey::START;
    loop {
        let page = f.db.fetch_rows(&query, cursor, 10).unwrap();
        let Some(last) = page.last() else {
            break;
        };
        cursor = last.key;
        seen.extend(page.into_iter().map(|r| r.object_version_id));
    }
    assert_eq!(seen, ovs);
}

#[test]
fn keys_are_distinct_when_one_object_version_fans_out() {
    let f = fixture();
    let order = f.order("2024-01-01T00:00:00Z", "open");
    for name in ["alice", "bob", "carol"] {
        let customer = f.customer(name);
        f.relate(order, customer);
    }
    let query = SqlitePlanner.plan_definition(&CandidateEventDefinition::Lookup {
        timestamp: f.created_at,
        identifier: f.customer_name,
        relationship: f.placed_by,
    });

    let mut names = Vec::new();
    let mut cursor = RowKey::START;
    while let Some(row) = f.db.fetch_rows(&query, cursor, 1).unwrap().pop() {
        assert_eq!(row.object_version_id, order);
        assert!(row.key > cursor);
        cursor = row.key;
        names.push(row.activity_name.unwrap());
    }
    assert_eq!(names, vec!["alice", "bob", "carol"]);
}

#[test]
fn next_page_resumes_after_the_last_key_seen() {
    let f = fixture();
    let ovs: Vec<_> = (0..20)
        .map(|i| f.order("2024-01-01T00:00:00Z", &format!("s{i}")))
        .collect();
    let query = SqlitePlanner.plan_definition(&CandidateEventDefinition::InTable {
        timestamp: f.created_at,
        identifier: f.status,
    });

    let first = f.db.fetch_rows(&query, RowKey::START, 10).unwrap();
    assert_eq!(first.last().unwrap().object_version_id, ovs[9]);

    // A new row that sorts before the cursor must not shift the next page.
    f.db.with_writer(|conn| mm::insert_attribute_value(conn, ovs[0], f.status, Some("late")))
        .unwrap();

    let second = f
        .db
        .fetch_rows(&query, first.last().unwrap().key, 10)
        .unwrap();
    let got: Vec<_> = second.iter().map(|r| r.object_version_id).collect();
    assert_eq!(got, ovs[10..].to_vec());
}

#[test]
fn null_values_come_back_as_none() {
    let f = fixture();
    f.db.with_writer(|conn| {
        let ov = mm::insert_object_version(conn, ClassId(1))?;
        mm::insert_attribute_value(conn, ov, f.created_at, None)?;
        mm::insert_attribute_value(conn, ov, f.status, None)?;
        Ok(())
    })
    .unwrap();

    let rows = f.rows(CandidateEventDefinition::InTable {
        timestamp: f.created_at,
        identifier: f.status,
    });
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].timestamp_value, None);
    assert_eq!(rows[0].activity_name, None);
}

proptest! {
    #[test]
    fn planning_is_idempotent(ts in 1i64..1000, id in 1i64..1000, rel in 1i64..1000, shape in 0u8..3) {
        let definition = match shape {
            0 => CandidateEventDefinition::TimestampField { timestamp: AttributeId(ts) },
            1 => CandidateEventDefinition::InTable { timestamp: AttributeId(ts), identifier: AttributeId(id) },
            _ => CandidateEventDefinition::Lookup {
                timestamp: AttributeId(ts),
                identifier: AttributeId(id),
                relationship: RelationshipTypeId(rel),
            },
        };
        let first = SqlitePlanner.plan_definition(&definition);
        let second = SqlitePlanner.plan(&definition.to_triple()).unwrap();
        prop_assert_eq!(first, second);
    }
}
