//! Discovery pipeline: enumeration per shape, scoring, and dump artifacts.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use eddy_core::config::DiscoveryConfig;
use eddy_core::errors::{EventError, ScoringError, SchemaError};
use eddy_core::progress::{CandidatesScoredEvent, EddyEventHandler, EventDispatcher};
use eddy_core::traits::CandidateScorer;
use eddy_core::types::*;
use eddy_events::dump;
use eddy_events::{discover_event_definitions, discover_with_dispatcher};
use eddy_storage::queries::meta_model as mm;
use eddy_storage::MetaModelDb;
use tempfile::TempDir;

/// order(created_at ts, status) --placed_by--> customer(name)
fn store() -> MetaModelDb {
    let db = MetaModelDb::open_in_memory().unwrap();
    db.with_writer(|conn| {
        let order = mm::insert_class(conn, "order")?;
        let customer = mm::insert_class(conn, "customer")?;
        mm::insert_attribute_name(conn, order, "created_at", "timestamp")?;
        mm::insert_attribute_name(conn, order, "status", "string")?;
        mm::insert_attribute_name(conn, customer, "name", "string")?;
        mm::insert_relationship(conn, "placed_by", order, customer)?;
        Ok(())
    })
    .unwrap();
    db
}

/// Accepts candidates whose identifier attribute id is even. Features are
/// the raw ids.
struct EvenIdentifierScorer;

impl CandidateScorer for EvenIdentifierScorer {
    fn extract_features(
        &self,
        candidate: &CandidateEventDefinition,
    ) -> Result<FeatureVector, ScoringError> {
        let id = candidate.identifier_attribute().map_or(0, |a| a.get());
        Ok(FeatureVector::new(vec![
            candidate.timestamp_attribute().get() as f64,
            id as f64,
        ]))
    }

    fn predict(&self, features: &[FeatureVector]) -> Result<Vec<bool>, ScoringError> {
        Ok(features
            .iter()
            .map(|f| f.values()[1] as i64 % 2 == 0)
            .collect())
    }
}

/// Drops the last prediction.
struct ShortScorer;

impl CandidateScorer for ShortScorer {
    fn extract_features(
        &self,
        _candidate: &CandidateEventDefinition,
    ) -> Result<FeatureVector, ScoringError> {
        Ok(FeatureVector::default())
    }

    fn predict(&self, features: &[FeatureVector]) -> Result<Vec<bool>, ScoringError> {
        Ok(vec![true; features.len().saturating_sub(1)])
    }
}

#[test]
fn without_scorer_every_candidate_is_accepted() {
    let db = store();
    let outcomes = discover_event_definitions(&db, None, &DiscoveryConfig::default()).unwrap();

    let shapes: Vec<_> = outcomes.iter().map(|o| o.shape).collect();
    assert_eq!(shapes, CandidateShape::ALL.to_vec());

    let sizes: Vec<_> = outcomes.iter().map(|o| o.candidates.len()).collect();
    assert_eq!(sizes, vec![1, 1, 1]);
    for outcome in &outcomes {
        assert!(outcome.features.is_empty());
        assert_eq!(outcome.accepted(), outcome.candidates);
    }
}

#[test]
fn scorer_filters_candidates() {
    let db = store();
    let outcomes =
        discover_event_definitions(&db, Some(&EvenIdentifierScorer), &DiscoveryConfig::default())
            .unwrap();

    // ts_field has identifier 0 (even); in_table has status (id 2, even);
    // lookup has customer.name (id 3, odd).
    let accepted: Vec<_> = outcomes.iter().map(|o| o.accepted().len()).collect();
    assert_eq!(accepted, vec![1, 1, 0]);
    assert_eq!(outcomes[2].rejected_count(), 1);
    assert_eq!(outcomes[1].features[0], FeatureVector::new(vec![1.0, 2.0]));
    assert_eq!(
        outcomes[1].accepted_triples(),
        vec![CandidateTriple::new(
            Some(AttributeId(1)),
            Some(AttributeId(2)),
            None
        )]
    );
}

#[test]
fn configured_shapes_limit_the_run() {
    let db = store();
    let config = DiscoveryConfig {
        shapes: vec![CandidateShape::Lookup],
        ..DiscoveryConfig::default()
    };
    let outcomes = discover_event_definitions(&db, None, &config).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].shape, CandidateShape::Lookup);
    assert_eq!(
        outcomes[0].candidates[0].relationship_type(),
        Some(RelationshipTypeId(1))
    );
}

#[test]
fn unknown_class_in_config_is_a_schema_error() {
    let db = store();
    let config = DiscoveryConfig {
        classes: vec!["shipment".to_string()],
        ..DiscoveryConfig::default()
    };
    let err = discover_event_definitions(&db, None, &config).unwrap_err();
    assert!(matches!(err, EventError::Schema(SchemaError::UnknownClass { .. })));
}

#[test]
fn prediction_count_mismatch_is_reported() {
    let db = store();
    let err = discover_event_definitions(&db, Some(&ShortScorer), &DiscoveryConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        EventError::Scoring(ScoringError::PredictionCountMismatch {
            expected: 1,
            actual: 0
        })
    ));
}

#[test]
fn dumps_are_written_per_shape_and_reload() {
    let db = store();
    let dir = TempDir::new().unwrap();
    let config = DiscoveryConfig {
        dump_dir: Some(dir.path().join("dumps")),
        ..DiscoveryConfig::default()
    };

    let outcomes = discover_event_definitions(&db, Some(&EvenIdentifierScorer), &config).unwrap();

    let dump_dir = dir.path().join("dumps");
    for outcome in &outcomes {
        let shape = outcome.shape;
        for prefix in ["candidates", "feature_values", "predicted_candidates"] {
            assert!(
                dump::dump_path(&dump_dir, prefix, shape).exists(),
                "{prefix}_{shape}.json missing"
            );
        }
        let reloaded = dump::load_candidates(&dump_dir, shape).unwrap();
        let expected: Vec<_> = outcome.candidates.iter().map(|c| c.to_triple()).collect();
        assert_eq!(reloaded, expected);
    }

    let predictions =
        std::fs::read_to_string(dump::dump_path(&dump_dir, "predicted_candidates", CandidateShape::Lookup))
            .unwrap();
    let predictions: Vec<bool> = serde_json::from_str(&predictions).unwrap();
    assert_eq!(predictions, vec![false]);
}

#[test]
fn without_scorer_only_candidates_are_dumped() {
    let db = store();
    let dir = TempDir::new().unwrap();
    let config = DiscoveryConfig {
        dump_dir: Some(dir.path().to_path_buf()),
        ..DiscoveryConfig::default()
    };

    discover_event_definitions(&db, None, &config).unwrap();

    assert!(dump::dump_path(dir.path(), "candidates", CandidateShape::TsField).exists());
    assert!(!dump::dump_path(dir.path(), "feature_values", CandidateShape::TsField).exists());
}

#[test]
fn repeated_runs_produce_identical_dumps() {
    let db = store();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    for dir in [&first, &second] {
        let config = DiscoveryConfig {
            dump_dir: Some(dir.path().to_path_buf()),
            ..DiscoveryConfig::default()
        };
        discover_event_definitions(&db, None, &config).unwrap();
    }
    for shape in CandidateShape::ALL {
        let a = std::fs::read(dump::dump_path(first.path(), "candidates", shape)).unwrap();
        let b = std::fs::read(dump::dump_path(second.path(), "candidates", shape)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn loading_a_missing_dump_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = dump::load_candidates(dir.path(), CandidateShape::InTable).unwrap_err();
    assert!(matches!(err, eddy_core::errors::DumpError::Io { .. }));
}

#[derive(Default)]
struct ScoredCounter {
    accepted: AtomicUsize,
    rejected: AtomicUsize,
}

impl EddyEventHandler for ScoredCounter {
    fn on_candidates_scored(&self, event: &CandidatesScoredEvent) {
        self.accepted.fetch_add(event.accepted, Ordering::Relaxed);
        self.rejected.fetch_add(event.rejected, Ordering::Relaxed);
    }
}

#[test]
fn progress_reports_scoring_totals() {
    let db = store();
    let counter = Arc::new(ScoredCounter::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(counter.clone());

    discover_with_dispatcher(
        &db,
        Some(&EvenIdentifierScorer),
        &DiscoveryConfig::default(),
        &dispatcher,
    )
    .unwrap();

    assert_eq!(counter.accepted.load(Ordering::Relaxed), 2);
    assert_eq!(counter.rejected.load(Ordering::Relaxed), 1);
}
