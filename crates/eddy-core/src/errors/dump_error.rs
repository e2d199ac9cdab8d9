//! Dump artifact errors.

use std::path::PathBuf;

use super::error_code::{self, EddyErrorCode};

/// Errors writing or reading JSON dump artifacts.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error on {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl EddyErrorCode for DumpError {
    fn error_code(&self) -> &'static str {
        error_code::DUMP_ERROR
    }
}
