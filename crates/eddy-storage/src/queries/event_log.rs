//! Event-log inserts and read-backs.
//!
//! The `insert_*` functions back `EventLogTransaction`. The `count_*` and
//! `load_*` functions and [`EventRecord`] are read-back helpers: the engine
//! never calls them. They exist so callers and tests can verify what a
//! materialization run wrote without hand-writing SQL against the event-log
//! tables.

use eddy_core::errors::StorageError;
use eddy_core::types::{ActivityId, ActivityInstanceId, EventId, ObjectVersionId};
use rusqlite::{params, Connection};

use crate::to_storage_err;

/// One materialized event joined back to its activity and object version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub event_id: EventId,
    pub activity_id: ActivityId,
    pub activity_name: String,
    pub activity_instance_id: ActivityInstanceId,
    pub timestamp_millis: i64,
    pub object_version_id: ObjectVersionId,
}

pub fn insert_activity(conn: &Connection, name: &str) -> Result<ActivityId, StorageError> {
    conn.prepare_cached("INSERT INTO activity (name) VALUES (?1)")
        .and_then(|mut stmt| stmt.execute(params![name]))
        .map_err(to_storage_err)?;
    Ok(ActivityId(conn.last_insert_rowid()))
}

pub fn insert_activity_instance(
    conn: &Connection,
    activity_id: ActivityId,
) -> Result<ActivityInstanceId, StorageError> {
    conn.prepare_cached("INSERT INTO activity_instance (activity_id) VALUES (?1)")
        .and_then(|mut stmt| stmt.execute(params![activity_id.get()]))
        .map_err(to_storage_err)?;
    Ok(ActivityInstanceId(conn.last_insert_rowid()))
}

pub fn insert_event(
    conn: &Connection,
    activity_instance_id: ActivityInstanceId,
    timestamp_millis: i64,
) -> Result<EventId, StorageError> {
    conn.prepare_cached("INSERT INTO event (activity_instance_id, timestamp) VALUES (?1, ?2)")
        .and_then(|mut stmt| stmt.execute(params![activity_instance_id.get(), timestamp_millis]))
        .map_err(to_storage_err)?;
    Ok(EventId(conn.last_insert_rowid()))
}

pub fn insert_event_link(
    conn: &Connection,
    event_id: EventId,
    object_version_id: ObjectVersionId,
) -> Result<(), StorageError> {
    conn.prepare_cached(
        "INSERT INTO event_to_object_version (event_id, object_version_id) VALUES (?1, ?2)",
    )
    .and_then(|mut stmt| stmt.execute(params![event_id.get(), object_version_id.get()]))
    .map_err(to_storage_err)?;
    Ok(())
}

// Read-back helpers.

fn count(conn: &Connection, table: &str) -> Result<i64, StorageError> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .map_err(to_storage_err)
}

pub fn count_activities(conn: &Connection) -> Result<i64, StorageError> {
    count(conn, "activity")
}

pub fn count_activity_instances(conn: &Connection) -> Result<i64, StorageError> {
    count(conn, "activity_instance")
}

pub fn count_events(conn: &Connection) -> Result<i64, StorageError> {
    count(conn, "event")
}

pub fn count_event_links(conn: &Connection) -> Result<i64, StorageError> {
    count(conn, "event_to_object_version")
}

/// Activity names with their ids, in id order.
pub fn load_activities(conn: &Connection) -> Result<Vec<(ActivityId, String)>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name FROM activity ORDER BY id")
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| Ok((ActivityId(row.get(0)?), row.get(1)?)))
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}

/// Every event with its activity and linked object version, in event order.
pub fn load_events(conn: &Connection) -> Result<Vec<EventRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT ev.id, act.id, act.name, ai.id, ev.timestamp, etov.object_version_id
             FROM event ev
             JOIN activity_instance ai ON ai.id = ev.activity_instance_id
             JOIN activity act ON act.id = ai.activity_id
             JOIN event_to_object_version etov ON etov.event_id = ev.id
             ORDER BY ev.id",
        )
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(EventRecord {
                event_id: EventId(row.get(0)?),
                activity_id: ActivityId(row.get(1)?),
                activity_name: row.get(2)?,
                activity_instance_id: ActivityInstanceId(row.get(3)?),
                timestamp_millis: row.get(4)?,
                object_version_id: ObjectVersionId(row.get(5)?),
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}
