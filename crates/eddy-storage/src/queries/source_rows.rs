//! Execution of planned read queries: counting and keyset paging.
//!
//! A page resumes strictly after the previous page's last key, so each page
//! is a range scan from that key instead of a re-scan of every earlier row.

use eddy_core::errors::StorageError;
use eddy_core::types::{ObjectVersionId, ReadQuery, RowKey, SourceRow};
use rusqlite::{params_from_iter, Connection};

use crate::to_storage_err;

/// Number of rows `query` yields.
pub fn count_rows(conn: &Connection, query: &ReadQuery) -> Result<u64, StorageError> {
    let sql = format!("SELECT COUNT(*) FROM ({})", query.sql);
    let count: i64 = conn
        .query_row(&sql, params_from_iter(query.params.iter()), |row| row.get(0))
        .map_err(to_storage_err)?;
    Ok(count.max(0) as u64)
}

/// One page of `query`: up to `limit` rows with keys greater than `after`.
pub fn fetch_rows(
    conn: &Connection,
    query: &ReadQuery,
    after: RowKey,
    limit: usize,
) -> Result<Vec<SourceRow>, StorageError> {
    let n = query.params.len();
    let sql = format!(
        "SELECT ov_id, ts_v, an_v, k1, k2, k3, k4 FROM ({})
         WHERE (k1, k2, k3, k4) > (?{}, ?{}, ?{}, ?{})
         ORDER BY k1, k2, k3, k4
         LIMIT ?{}",
        query.sql,
        n + 1,
        n + 2,
        n + 3,
        n + 4,
        n + 5
    );
    let mut params = query.params.clone();
    params.extend_from_slice(&after.0);
    params.push(i64::try_from(limit).unwrap_or(i64::MAX));

    let mut stmt = conn.prepare_cached(&sql).map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok(SourceRow {
                object_version_id: ObjectVersionId(row.get(0)?),
                timestamp_value: row.get(1)?,
                activity_name: row.get(2)?,
                key: RowKey([row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?]),
            })
        })
        .map_err(to_storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_storage_err)
}
