//! Shared constants for the Eddy engine.

/// Eddy version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows written per committed transaction during materialization.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Declared `attribute_name.type` that marks timestamp-bearing attributes.
pub const TIMESTAMP_TYPE: &str = "timestamp";

/// Default number of read-only connections for file-backed stores.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Upper bound on read-only connections.
pub const MAX_READ_POOL_SIZE: usize = 8;

/// Project config file name, resolved against the project root.
pub const CONFIG_FILE_NAME: &str = "eddy.toml";

/// Environment variable holding per-target log filters.
pub const LOG_ENV_VAR: &str = "EDDY_LOG";

// ---- Dump artifact prefixes (suffixed with `_<shape>.json`) ----

/// Enumerated candidates.
pub const CANDIDATES_DUMP_PREFIX: &str = "candidates";

/// Feature vectors, one per candidate.
pub const FEATURES_DUMP_PREFIX: &str = "feature_values";

/// Accept/reject predictions, one per candidate.
pub const PREDICTIONS_DUMP_PREFIX: &str = "predicted_candidates";
