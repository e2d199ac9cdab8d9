//! Discovery pipeline: catalog, timestamp attributes, candidates per shape,
//! optional scoring, optional dumps.

use eddy_core::config::DiscoveryConfig;
use eddy_core::errors::{EventError, ScoringError};
use eddy_core::progress::{CandidatesEnumeratedEvent, CandidatesScoredEvent, EventDispatcher};
use eddy_core::tracing::metrics::{CANDIDATE_COUNT, SHAPE};
use eddy_core::traits::{CandidateScorer, MetaModelReader};
use eddy_core::types::{CandidateEventDefinition, CandidateShape, CandidateTriple, FeatureVector};

use crate::dump;
use crate::enumerator::CandidateEnumerator;

/// Candidates of one shape and the scorer's verdict on each.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryOutcome {
    pub shape: CandidateShape,
    pub candidates: Vec<CandidateEventDefinition>,
    /// Empty when no scorer was supplied.
    pub features: Vec<FeatureVector>,
    /// One entry per candidate. All `true` when no scorer was supplied.
    pub predictions: Vec<bool>,
}

impl DiscoveryOutcome {
    /// Accepted candidates, in candidate order.
    pub fn accepted(&self) -> Vec<CandidateEventDefinition> {
        self.candidates
            .iter()
            .zip(&self.predictions)
            .filter(|(_, accepted)| **accepted)
            .map(|(candidate, _)| *candidate)
            .collect()
    }

    /// Accepted candidates in the form [`EventMaterializer`] takes.
    ///
    /// [`EventMaterializer`]: crate::materializer::EventMaterializer
    pub fn accepted_triples(&self) -> Vec<CandidateTriple> {
        self.accepted().iter().map(|c| c.to_triple()).collect()
    }

    pub fn rejected_count(&self) -> usize {
        self.predictions.iter().filter(|p| !**p).count()
    }
}

/// Enumerate and score candidates for every configured shape.
pub fn discover_event_definitions(
    reader: &dyn MetaModelReader,
    scorer: Option<&dyn CandidateScorer>,
    config: &DiscoveryConfig,
) -> Result<Vec<DiscoveryOutcome>, EventError> {
    discover_with_dispatcher(reader, scorer, config, &EventDispatcher::new())
}

/// [`discover_event_definitions`] with progress notifications.
pub fn discover_with_dispatcher(
    reader: &dyn MetaModelReader,
    scorer: Option<&dyn CandidateScorer>,
    config: &DiscoveryConfig,
    dispatcher: &EventDispatcher,
) -> Result<Vec<DiscoveryOutcome>, EventError> {
    let catalog = reader.schema_catalog()?;
    let enumerator = CandidateEnumerator::new(&catalog);
    let timestamps = enumerator.timestamp_attributes(&config.classes)?;
    tracing::info!(timestamp_attributes = timestamps.len(), "loaded schema catalog");

    let mut outcomes = Vec::new();
    for shape in config.effective_shapes() {
        let candidates = enumerator.enumerate(&timestamps, shape)?;
        tracing::info!(
            { SHAPE } = %shape,
            { CANDIDATE_COUNT } = candidates.len(),
            "enumerated candidates"
        );
        dispatcher.emit_candidates_enumerated(&CandidatesEnumeratedEvent {
            shape,
            count: candidates.len(),
        });

        let (features, predictions) = match scorer {
            Some(scorer) => score(scorer, &candidates)?,
            None => (Vec::new(), vec![true; candidates.len()]),
        };

        let outcome = DiscoveryOutcome {
            shape,
            candidates,
            features,
            predictions,
        };
        let accepted = outcome.predictions.len() - outcome.rejected_count();
        dispatcher.emit_candidates_scored(&CandidatesScoredEvent {
            shape,
            accepted,
            rejected: outcome.rejected_count(),
        });

        if let Some(dir) = &config.dump_dir {
            dump::write_candidates(dir, shape, &outcome.candidates)?;
            if scorer.is_some() {
                dump::write_features(dir, shape, &outcome.features)?;
                dump::write_predictions(dir, shape, &outcome.predictions)?;
            }
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

fn score(
    scorer: &dyn CandidateScorer,
    candidates: &[CandidateEventDefinition],
) -> Result<(Vec<FeatureVector>, Vec<bool>), ScoringError> {
    let features = candidates
        .iter()
        .map(|c| scorer.extract_features(c))
        .collect::<Result<Vec<_>, _>>()?;
    let predictions = scorer.predict(&features)?;
    if predictions.len() != candidates.len() {
        return Err(ScoringError::PredictionCountMismatch {
            expected: candidates.len(),
            actual: predictions.len(),
        });
    }
    Ok((features, predictions))
}
