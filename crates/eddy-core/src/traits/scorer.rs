//! CandidateScorer: the pluggable "looks like an activity identifier" model.
//!
//! Feature functions and the trained classifier live outside Eddy. The
//! discovery pipeline only asks for a feature vector per candidate and a
//! batch prediction over those vectors.

use crate::errors::ScoringError;
use crate::types::{CandidateEventDefinition, FeatureVector};

pub trait CandidateScorer {
    /// Compute the feature vector for one candidate.
    fn extract_features(
        &self,
        candidate: &CandidateEventDefinition,
    ) -> Result<FeatureVector, ScoringError>;

    /// Accept (`true`) or reject each vector. Must return exactly one
    /// prediction per input, in input order.
    fn predict(&self, features: &[FeatureVector]) -> Result<Vec<bool>, ScoringError>;
}
