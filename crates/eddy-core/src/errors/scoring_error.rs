//! Candidate scorer errors.

use super::error_code::{self, EddyErrorCode};
use crate::types::CandidateEventDefinition;

/// Errors reported by a [`CandidateScorer`](crate::traits::CandidateScorer).
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Feature extraction failed for {candidate}: {message}")]
    FeatureExtraction {
        candidate: CandidateEventDefinition,
        message: String,
    },

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Scorer returned {actual} predictions for {expected} candidates")]
    PredictionCountMismatch { expected: usize, actual: usize },
}

impl EddyErrorCode for ScoringError {
    fn error_code(&self) -> &'static str {
        error_code::SCORING_ERROR
    }
}
