//! Candidate discovery configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::CandidateShape;

/// Configuration for candidate enumeration and scoring.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Class names whose timestamp attributes are considered. Empty = all.
    pub classes: Vec<String>,
    /// Shapes to enumerate. Empty = all three.
    pub shapes: Vec<CandidateShape>,
    /// Directory for JSON dump artifacts. None = no dumps.
    pub dump_dir: Option<PathBuf>,
}

impl DiscoveryConfig {
    /// Returns the shapes to enumerate, defaulting to all of them.
    pub fn effective_shapes(&self) -> Vec<CandidateShape> {
        if self.shapes.is_empty() {
            CandidateShape::ALL.to_vec()
        } else {
            self.shapes.clone()
        }
    }
}
