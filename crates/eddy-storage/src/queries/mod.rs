//! Query modules for each group of tables.

pub mod event_log;
pub mod meta_model;
pub mod schema;
pub mod source_rows;
