//! JSON dump artifacts for discovery runs.
//!
//! One file per shape and artifact kind, each a pretty-printed array in
//! candidate order:
//! - `candidates_<shape>.json`: candidate triples
//! - `feature_values_<shape>.json`: feature vectors
//! - `predicted_candidates_<shape>.json`: accept/reject per candidate

use std::fs;
use std::path::{Path, PathBuf};

use eddy_core::constants::{CANDIDATES_DUMP_PREFIX, FEATURES_DUMP_PREFIX, PREDICTIONS_DUMP_PREFIX};
use eddy_core::errors::DumpError;
use eddy_core::types::{CandidateEventDefinition, CandidateShape, CandidateTriple, FeatureVector};
use serde::Serialize;

/// Path of one dump artifact.
pub fn dump_path(dir: &Path, prefix: &str, shape: CandidateShape) -> PathBuf {
    dir.join(format!("{prefix}_{shape}.json"))
}

pub fn write_candidates(
    dir: &Path,
    shape: CandidateShape,
    candidates: &[CandidateEventDefinition],
) -> Result<PathBuf, DumpError> {
    let triples: Vec<CandidateTriple> = candidates.iter().map(|c| c.to_triple()).collect();
    write_json(&dump_path(dir, CANDIDATES_DUMP_PREFIX, shape), &triples)
}

pub fn write_features(
    dir: &Path,
    shape: CandidateShape,
    features: &[FeatureVector],
) -> Result<PathBuf, DumpError> {
    write_json(&dump_path(dir, FEATURES_DUMP_PREFIX, shape), features)
}

pub fn write_predictions(
    dir: &Path,
    shape: CandidateShape,
    predictions: &[bool],
) -> Result<PathBuf, DumpError> {
    write_json(&dump_path(dir, PREDICTIONS_DUMP_PREFIX, shape), predictions)
}

/// Read a `candidates_<shape>.json` dump back as triples.
pub fn load_candidates(dir: &Path, shape: CandidateShape) -> Result<Vec<CandidateTriple>, DumpError> {
    let path = dump_path(dir, CANDIDATES_DUMP_PREFIX, shape);
    let text = fs::read_to_string(&path).map_err(|source| DumpError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DumpError::Json { path, source })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf, DumpError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| DumpError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|source| DumpError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote dump");
    Ok(path.to_path_buf())
}
