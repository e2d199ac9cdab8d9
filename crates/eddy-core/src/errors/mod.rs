//! Error handling for Eddy.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod definition_error;
pub mod dump_error;
pub mod error_code;
pub mod event_error;
pub mod schema_error;
pub mod scoring_error;
pub mod storage_error;
pub mod timestamp_error;

pub use config_error::ConfigError;
pub use definition_error::DefinitionError;
pub use dump_error::DumpError;
pub use error_code::EddyErrorCode;
pub use event_error::EventError;
pub use schema_error::SchemaError;
pub use scoring_error::ScoringError;
pub use storage_error::StorageError;
pub use timestamp_error::TimestampParseError;
