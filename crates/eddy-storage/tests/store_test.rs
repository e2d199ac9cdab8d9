//! Schema catalog loading and source/target store pairing.

use std::sync::Arc;

use eddy_core::config::StorageConfig;
use eddy_core::traits::{EventLogWriter, MetaModelReader};
use eddy_core::types::*;
use eddy_storage::queries::{event_log, meta_model as mm};
use eddy_storage::{MetaModelDb, StorePair};
use tempfile::TempDir;

fn seeded_store() -> MetaModelDb {
    let db = MetaModelDb::open_in_memory().unwrap();
    db.with_writer(|conn| {
        let invoice = mm::insert_class(conn, "invoice")?;
        let order = mm::insert_class(conn, "order")?;
        mm::insert_attribute_name(conn, order, "placed_at", "timestamp")?;
        mm::insert_attribute_name(conn, invoice, "issued_at", "TIMESTAMP")?;
        mm::insert_attribute_name(conn, invoice, "kind", "string")?;
        mm::insert_relationship(conn, "billed_for", invoice, order)?;
        Ok(())
    })
    .unwrap();
    db
}

#[test]
fn catalog_reflects_declared_schema_in_id_order() {
    let db = seeded_store();
    let catalog = db.schema_catalog().unwrap();

    let names: Vec<_> = catalog.classes().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["invoice", "order"]);

    let attrs: Vec<_> = catalog.attributes().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(attrs, vec!["placed_at", "issued_at", "kind"]);
    assert!(catalog.attributes().iter().filter(|a| a.is_timestamp()).count() == 2);

    let rel = &catalog.relationships()[0];
    assert_eq!(rel.name, "billed_for");
    assert_eq!(rel.source_class, catalog.class_by_name("invoice").unwrap().id);
    assert_eq!(rel.target_class, catalog.class_by_name("order").unwrap().id);
}

#[test]
fn empty_store_has_empty_catalog() {
    let db = MetaModelDb::open_in_memory().unwrap();
    let catalog = db.schema_catalog().unwrap();
    assert!(catalog.classes().is_empty());
    assert!(catalog.attributes().is_empty());
    assert!(catalog.relationships().is_empty());
}

#[test]
fn single_pair_reads_and_writes_one_store() {
    let pair = StorePair::single(Arc::new(seeded_store()));
    assert!(!pair.is_split());
    assert!(std::ptr::eq(pair.reader(), pair.writer()));

    let mut tx = pair.writer().begin().unwrap();
    let act = tx.insert_activity("Created").unwrap();
    let inst = tx.insert_activity_instance(act).unwrap();
    let ev = tx.insert_event(inst, 0).unwrap();
    tx.insert_event_link(ev, ObjectVersionId(1)).unwrap();
    tx.commit().unwrap();

    let events = pair
        .reader()
        .with_reader(|conn| event_log::count_events(conn))
        .unwrap();
    assert_eq!(events, 1);
}

#[test]
fn split_pair_writes_only_to_target() {
    let source = Arc::new(seeded_store());
    let target = Arc::new(MetaModelDb::open_in_memory().unwrap());
    let pair = StorePair::split(Arc::clone(&source), Arc::clone(&target));
    assert!(pair.is_split());

    let mut tx = pair.writer().begin().unwrap();
    let act = tx.insert_activity("Shipped").unwrap();
    let inst = tx.insert_activity_instance(act).unwrap();
    let ev = tx.insert_event(inst, 1_000).unwrap();
    // Object version ids belong to the source; the target accepts them as-is.
    tx.insert_event_link(ev, ObjectVersionId(42)).unwrap();
    tx.commit().unwrap();

    let in_source = source.with_reader(|conn| event_log::count_events(conn)).unwrap();
    let in_target = target.with_reader(|conn| event_log::count_events(conn)).unwrap();
    assert_eq!(in_source, 0);
    assert_eq!(in_target, 1);

    let records = target.with_reader(|conn| event_log::load_events(conn)).unwrap();
    assert_eq!(records[0].activity_name, "Shipped");
    assert_eq!(records[0].object_version_id, ObjectVersionId(42));
}

#[test]
fn open_from_config_creates_both_files() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig {
        source_path: Some(dir.path().join("source.db")),
        target_path: Some(dir.path().join("target.db")),
        read_pool_size: Some(2),
    };

    let pair = StorePair::open(&config).unwrap();
    assert!(pair.is_split());
    assert_eq!(pair.reader().path(), Some(dir.path().join("source.db").as_path()));
    assert_eq!(pair.writer().path(), Some(dir.path().join("target.db").as_path()));
}

#[test]
fn open_without_paths_is_in_memory_single() {
    let pair = StorePair::open(&StorageConfig::default()).unwrap();
    assert!(!pair.is_split());
    assert!(pair.reader().path().is_none());
}
