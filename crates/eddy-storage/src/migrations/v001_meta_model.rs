//! V001: Meta-model schema.
//! datamodel, class, attribute_name, relationship, object, object_version,
//! attribute_value, relation.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS datamodel (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Object types of the source application.
CREATE TABLE IF NOT EXISTS class (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    datamodel_id INTEGER REFERENCES datamodel(id),
    name TEXT NOT NULL
);

-- Declared attributes. `type` drives timestamp discovery.
CREATE TABLE IF NOT EXISTS attribute_name (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    class_id INTEGER NOT NULL REFERENCES class(id),
    name TEXT NOT NULL,
    type TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_attribute_name_class
    ON attribute_name(class_id);

-- Relationship types: relations go from an object version of `source`
-- to an object version of `target`.
CREATE TABLE IF NOT EXISTS relationship (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source INTEGER NOT NULL REFERENCES class(id),
    target INTEGER NOT NULL REFERENCES class(id),
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS object (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    class_id INTEGER NOT NULL REFERENCES class(id)
);

CREATE TABLE IF NOT EXISTS object_version (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    object_id INTEGER NOT NULL REFERENCES object(id),
    start_timestamp INTEGER,
    end_timestamp INTEGER
);

CREATE INDEX IF NOT EXISTS idx_object_version_object
    ON object_version(object_id);

CREATE TABLE IF NOT EXISTS attribute_value (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    object_version_id INTEGER NOT NULL REFERENCES object_version(id),
    attribute_name_id INTEGER NOT NULL REFERENCES attribute_name(id),
    value TEXT
);

CREATE INDEX IF NOT EXISTS idx_attribute_value_attr
    ON attribute_value(attribute_name_id, object_version_id);
CREATE INDEX IF NOT EXISTS idx_attribute_value_ov
    ON attribute_value(object_version_id);

-- Directed, typed edges between object versions.
CREATE TABLE IF NOT EXISTS relation (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_object_version_id INTEGER NOT NULL REFERENCES object_version(id),
    target_object_version_id INTEGER NOT NULL REFERENCES object_version(id),
    relationship_id INTEGER NOT NULL REFERENCES relationship(id),
    start_timestamp INTEGER,
    end_timestamp INTEGER
);

CREATE INDEX IF NOT EXISTS idx_relation_source
    ON relation(relationship_id, source_object_version_id);
"#;
