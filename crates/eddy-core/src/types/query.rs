//! Planned read queries and the rows they yield.

use serde::{Deserialize, Serialize};

use super::candidate::CandidateShape;
use super::identifiers::ObjectVersionId;

/// A parameterized read query against the meta-model.
///
/// Executing it yields rows of seven columns, in this order: object version
/// id, raw timestamp value, raw activity name, then the four key columns
/// `k1..k4`. The key columns hold the ids of the joined rows (zero where a
/// shape joins fewer tables), so each row has a distinct key. Stores visit
/// rows in ascending key order and page by resuming after the last key seen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadQuery {
    pub shape: CandidateShape,
    pub sql: String,
    /// Positional parameters bound to `?1..?n`.
    pub params: Vec<i64>,
}

/// Position of a row within its query's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowKey(pub [i64; 4]);

impl RowKey {
    /// Sorts before every row; the cursor for a first page.
    pub const START: RowKey = RowKey([i64::MIN; 4]);
}

/// One row produced by a [`ReadQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub object_version_id: ObjectVersionId,
    pub timestamp_value: Option<String>,
    pub activity_name: Option<String>,
    pub key: RowKey,
}
