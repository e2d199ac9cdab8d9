//! Write side of the store: append-only event-log rows inside transactions.

use crate::errors::StorageError;
use crate::types::{ActivityId, ActivityInstanceId, EventId, ObjectVersionId};

/// Opens write transactions against an event-log store.
///
/// At most one transaction per writer is open at a time.
pub trait EventLogWriter {
    fn begin(&self) -> Result<Box<dyn EventLogTransaction + '_>, StorageError>;
}

/// An open write transaction. Dropping it without `commit` rolls it back.
pub trait EventLogTransaction {
    fn insert_activity(&mut self, name: &str) -> Result<ActivityId, StorageError>;

    fn insert_activity_instance(
        &mut self,
        activity_id: ActivityId,
    ) -> Result<ActivityInstanceId, StorageError>;

    fn insert_event(
        &mut self,
        activity_instance_id: ActivityInstanceId,
        timestamp_millis: i64,
    ) -> Result<EventId, StorageError>;

    fn insert_event_link(
        &mut self,
        event_id: EventId,
        object_version_id: ObjectVersionId,
    ) -> Result<(), StorageError>;

    fn commit(self: Box<Self>) -> Result<(), StorageError>;

    fn rollback(self: Box<Self>) -> Result<(), StorageError>;
}
