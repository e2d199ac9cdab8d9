//! Structured span field names used across Eddy subsystems.
//!
//! Consistent field names keep log queries stable between releases.

/// Discovery: candidate shape being processed.
pub const SHAPE: &str = "shape";

/// Discovery: number of candidates enumerated for a shape.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Materialization: position of the definition in the run.
pub const DEFINITION_INDEX: &str = "definition_index";

/// Materialization: rows the planned query is expected to yield.
pub const EXPECTED_ROWS: &str = "expected_rows";

/// Materialization: rows written in the committed batch.
pub const BATCH_ROWS: &str = "batch_rows";

/// Materialization: commit duration in milliseconds.
pub const BATCH_COMMIT_TIME: &str = "batch_commit_time";
