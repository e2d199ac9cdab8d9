//! Meta-model inserts, used by loaders that populate a store from an
//! application database.

use eddy_core::errors::StorageError;
use eddy_core::types::{AttributeId, ClassId, ObjectVersionId, RelationshipTypeId};
use rusqlite::{params, Connection};

use crate::to_storage_err;

pub fn insert_class(conn: &Connection, name: &str) -> Result<ClassId, StorageError> {
    conn.execute("INSERT INTO class (name) VALUES (?1)", params![name])
        .map_err(to_storage_err)?;
    Ok(ClassId(conn.last_insert_rowid()))
}

pub fn insert_attribute_name(
    conn: &Connection,
    class_id: ClassId,
    name: &str,
    data_type: &str,
) -> Result<AttributeId, StorageError> {
    conn.execute(
        "INSERT INTO attribute_name (class_id, name, type) VALUES (?1, ?2, ?3)",
        params![class_id.get(), name, data_type],
    )
    .map_err(to_storage_err)?;
    Ok(AttributeId(conn.last_insert_rowid()))
}

pub fn insert_relationship(
    conn: &Connection,
    name: &str,
    source: ClassId,
    target: ClassId,
) -> Result<RelationshipTypeId, StorageError> {
    conn.execute(
        "INSERT INTO relationship (name, source, target) VALUES (?1, ?2, ?3)",
        params![name, source.get(), target.get()],
    )
    .map_err(to_storage_err)?;
    Ok(RelationshipTypeId(conn.last_insert_rowid()))
}

/// Insert an object and its first version; returns the version id.
pub fn insert_object_version(
    conn: &Connection,
    class_id: ClassId,
) -> Result<ObjectVersionId, StorageError> {
    conn.execute("INSERT INTO object (class_id) VALUES (?1)", params![class_id.get()])
        .map_err(to_storage_err)?;
    let object_id = conn.last_insert_rowid();
    conn.execute(
        "INSERT INTO object_version (object_id) VALUES (?1)",
        params![object_id],
    )
    .map_err(to_storage_err)?;
    Ok(ObjectVersionId(conn.last_insert_rowid()))
}

pub fn insert_attribute_value(
    conn: &Connection,
    object_version_id: ObjectVersionId,
    attribute_id: AttributeId,
    value: Option<&str>,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO attribute_value (object_version_id, attribute_name_id, value)
         VALUES (?1, ?2, ?3)",
        params![object_version_id.get(), attribute_id.get(), value],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

pub fn insert_relation(
    conn: &Connection,
    relationship_id: RelationshipTypeId,
    source: ObjectVersionId,
    target: ObjectVersionId,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO relation (source_object_version_id, target_object_version_id, relationship_id)
         VALUES (?1, ?2, ?3)",
        params![source.get(), target.get(), relationship_id.get()],
    )
    .map_err(to_storage_err)?;
    Ok(())
}
