//! Event-log write transactions on the serialized writer connection.
//!
//! The transaction holds the store, not the writer lock: each statement takes
//! the lock briefly, so the same store can serve paged reads while a batch is
//! open. Only one transaction per store may be open at a time.

use eddy_core::errors::StorageError;
use eddy_core::traits::EventLogTransaction;
use eddy_core::types::{ActivityId, ActivityInstanceId, EventId, ObjectVersionId};

use super::MetaModelDb;
use crate::queries::event_log;

/// An open `BEGIN IMMEDIATE` transaction. Rolled back on drop unless
/// committed.
pub struct SqliteEventLogTransaction<'a> {
    db: &'a MetaModelDb,
    open: bool,
}

impl<'a> SqliteEventLogTransaction<'a> {
    pub(crate) fn begin(db: &'a MetaModelDb) -> Result<Self, StorageError> {
        db.with_writer(|conn| {
            conn.execute_batch("BEGIN IMMEDIATE")
                .map_err(|e| StorageError::Transaction {
                    message: format!("failed to begin immediate transaction: {e}"),
                })
        })?;
        Ok(Self { db, open: true })
    }

    fn finish(&mut self, statement: &str) -> Result<(), StorageError> {
        self.db.with_writer(|conn| {
            conn.execute_batch(statement)
                .map_err(|e| StorageError::Transaction {
                    message: format!("{statement} failed: {e}"),
                })
        })?;
        self.open = false;
        Ok(())
    }
}

impl EventLogTransaction for SqliteEventLogTransaction<'_> {
    fn insert_activity(&mut self, name: &str) -> Result<ActivityId, StorageError> {
        self.db.with_writer(|conn| event_log::insert_activity(conn, name))
    }

    fn insert_activity_instance(
        &mut self,
        activity_id: ActivityId,
    ) -> Result<ActivityInstanceId, StorageError> {
        self.db
            .with_writer(|conn| event_log::insert_activity_instance(conn, activity_id))
    }

    fn insert_event(
        &mut self,
        activity_instance_id: ActivityInstanceId,
        timestamp_millis: i64,
    ) -> Result<EventId, StorageError> {
        self.db.with_writer(|conn| {
            event_log::insert_event(conn, activity_instance_id, timestamp_millis)
        })
    }

    fn insert_event_link(
        &mut self,
        event_id: EventId,
        object_version_id: ObjectVersionId,
    ) -> Result<(), StorageError> {
        self.db
            .with_writer(|conn| event_log::insert_event_link(conn, event_id, object_version_id))
    }

    fn commit(mut self: Box<Self>) -> Result<(), StorageError> {
        self.finish("COMMIT")
    }

    fn rollback(mut self: Box<Self>) -> Result<(), StorageError> {
        self.finish("ROLLBACK")
    }
}

impl Drop for SqliteEventLogTransaction<'_> {
    fn drop(&mut self) {
        if self.open {
            if let Err(e) = self.finish("ROLLBACK") {
                tracing::warn!(error = %e, "rollback of abandoned transaction failed");
            }
        }
    }
}
