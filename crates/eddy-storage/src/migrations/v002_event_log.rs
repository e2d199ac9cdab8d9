//! V002: Event-log schema.
//! activity, activity_instance, event, event_to_object_version.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS activity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS activity_instance (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    activity_id INTEGER NOT NULL REFERENCES activity(id)
);

-- `timestamp` is epoch milliseconds.
CREATE TABLE IF NOT EXISTS event (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    activity_instance_id INTEGER NOT NULL REFERENCES activity_instance(id),
    timestamp INTEGER NOT NULL,
    lifecycle TEXT,
    resource TEXT
);

CREATE INDEX IF NOT EXISTS idx_event_instance
    ON event(activity_instance_id);

-- No foreign key on object_version_id: the event log may live in a separate
-- store from the meta-model that supplied the object versions.
CREATE TABLE IF NOT EXISTS event_to_object_version (
    event_id INTEGER NOT NULL REFERENCES event(id),
    object_version_id INTEGER NOT NULL,
    label TEXT,
    PRIMARY KEY (event_id, object_version_id)
);

CREATE INDEX IF NOT EXISTS idx_event_to_ov_ov
    ON event_to_object_version(object_version_id);
"#;
