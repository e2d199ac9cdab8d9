//! Schema catalog reads: classes, attribute names, relationship types.

use eddy_core::errors::StorageError;
use eddy_core::types::{
    AttributeId, AttributeInfo, ClassId, ClassInfo, RelationshipTypeId, RelationshipTypeInfo,
    SchemaCatalog,
};
use rusqlite::Connection;

use crate::to_storage_err;

/// Load the full declared schema, each collection ordered by id.
pub fn load_catalog(conn: &Connection) -> Result<SchemaCatalog, StorageError> {
    Ok(SchemaCatalog::new(
        load_classes(conn)?,
        load_attributes(conn)?,
        load_relationships(conn)?,
    ))
}

pub fn load_classes(conn: &Connection) -> Result<Vec<ClassInfo>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name FROM class ORDER BY id")
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ClassInfo {
                id: ClassId(row.get(0)?),
                name: row.get(1)?,
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}

pub fn load_attributes(conn: &Connection) -> Result<Vec<AttributeInfo>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, class_id, name, type FROM attribute_name ORDER BY id")
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AttributeInfo {
                id: AttributeId(row.get(0)?),
                class_id: ClassId(row.get(1)?),
                name: row.get(2)?,
                data_type: row.get(3)?,
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}

pub fn load_relationships(conn: &Connection) -> Result<Vec<RelationshipTypeInfo>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name, source, target FROM relationship ORDER BY id")
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(RelationshipTypeInfo {
                id: RelationshipTypeId(row.get(0)?),
                name: row.get(1)?,
                source_class: ClassId(row.get(2)?),
                target_class: ClassId(row.get(3)?),
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}
