//! EventMaterializer: event-log rows from candidate event definitions.
//!
//! Each definition is planned, its rows are pulled from the reader in keyset
//! pages, and every row becomes one activity instance, one event, and one
//! event link.
//! Activities are created once per distinct name within a definition. Writes
//! are committed every `batch_size` rows; a failure rolls back only the open
//! batch, so earlier batches and earlier definitions stay durable.

use std::time::Instant;

use eddy_core::config::MaterializationConfig;
use eddy_core::constants::DEFAULT_BATCH_SIZE;
use eddy_core::errors::{
    DefinitionError, EddyErrorCode, EventError, StorageError, TimestampParseError,
};
use eddy_core::progress::{
    BatchCommittedEvent, DefinitionCompleteEvent, DefinitionStartedEvent, EventDispatcher,
    MaterializationErrorEvent,
};
use eddy_core::tracing::metrics::{
    BATCH_COMMIT_TIME, BATCH_ROWS, DEFINITION_INDEX, EXPECTED_ROWS,
};
use eddy_core::traits::{
    DateNormalizer, EventLogTransaction, EventLogWriter, MetaModelReader, QueryPlanner,
};
use eddy_core::types::{
    ActivityId, CandidateEventDefinition, CandidateTriple, FxHashMap, ReadQuery, RowKey,
    SourceRow,
};
use eddy_storage::{SqlitePlanner, StorePair};
use serde::Serialize;

use crate::timestamp::ChronoNormalizer;

/// Outcome of one materialized definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionReport {
    pub definition: CandidateTriple,
    /// Row count reported by the reader before materialization began.
    pub expected_rows: u64,
    pub rows: u64,
    pub activities_created: usize,
    pub batches_committed: usize,
}

/// Outcome of a full materialization run, one entry per definition in input
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializationReport {
    pub definitions: Vec<DefinitionReport>,
}

impl MaterializationReport {
    pub fn total_rows(&self) -> u64 {
        self.definitions.iter().map(|d| d.rows).sum()
    }

    pub fn total_activities(&self) -> usize {
        self.definitions.iter().map(|d| d.activities_created).sum()
    }

    pub fn total_batches(&self) -> usize {
        self.definitions.iter().map(|d| d.batches_committed).sum()
    }
}

/// A failed definition: the 1-based row position, if row-specific, and the
/// cause.
type RowFailure = (Option<u64>, EventError);

fn fail(row: Option<u64>, error: impl Into<EventError>) -> RowFailure {
    (row, error.into())
}

/// State local to one definition's run.
struct DefinitionRun<'w> {
    tx: Option<Box<dyn EventLogTransaction + 'w>>,
    activities: FxHashMap<String, ActivityId>,
    rows: u64,
    rows_in_batch: usize,
    batches_committed: usize,
}

impl<'w> DefinitionRun<'w> {
    fn new() -> Self {
        Self {
            tx: None,
            activities: FxHashMap::default(),
            rows: 0,
            rows_in_batch: 0,
            batches_committed: 0,
        }
    }
}

/// Writes event-log rows for candidate definitions.
///
/// `reader` and `writer` may be the same store.
pub struct EventMaterializer<'a> {
    reader: &'a dyn MetaModelReader,
    writer: &'a dyn EventLogWriter,
    planner: Box<dyn QueryPlanner + 'a>,
    normalizer: Box<dyn DateNormalizer + 'a>,
    batch_size: usize,
    dispatcher: EventDispatcher,
}

impl<'a> EventMaterializer<'a> {
    /// Materializer with the SQLite planner, the chrono normalizer, and the
    /// default batch size.
    pub fn new(reader: &'a dyn MetaModelReader, writer: &'a dyn EventLogWriter) -> Self {
        Self {
            reader,
            writer,
            planner: Box::new(SqlitePlanner),
            normalizer: Box::new(ChronoNormalizer),
            batch_size: DEFAULT_BATCH_SIZE,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Read from the pair's source, write to its target.
    pub fn for_stores(stores: &'a StorePair) -> Self {
        Self::new(stores.reader(), stores.writer())
    }

    pub fn with_config(self, config: &MaterializationConfig) -> Self {
        self.with_batch_size(config.effective_batch_size())
    }

    /// Rows per committed transaction; values below 1 are raised to 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_planner(mut self, planner: Box<dyn QueryPlanner + 'a>) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn DateNormalizer + 'a>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Materialize `definitions` in order, stopping at the first failure.
    ///
    /// On error, everything committed before the failing batch remains in
    /// the writer's store; the caller may re-invoke with the remaining
    /// definitions.
    pub fn materialize(
        &self,
        definitions: &[CandidateTriple],
    ) -> Result<MaterializationReport, EventError> {
        let mut report = MaterializationReport::default();
        for (index, definition) in definitions.iter().enumerate() {
            let span = tracing::info_span!(
                "materialize_definition",
                { DEFINITION_INDEX } = index,
                definition = %definition,
            );
            let _guard = span.enter();

            match self.materialize_one(index, definitions.len(), definition) {
                Ok(entry) => report.definitions.push(entry),
                Err((row, source)) => {
                    let error = EventError::Materialization {
                        index,
                        definition: *definition,
                        row,
                        source: Box::new(source),
                    };
                    tracing::error!(error = %error, "materialization failed");
                    self.dispatcher
                        .emit_materialization_error(&MaterializationErrorEvent {
                            index,
                            error_code: error.error_code(),
                            message: error.to_string(),
                        });
                    return Err(error);
                }
            }
        }
        tracing::info!(
            definitions = report.definitions.len(),
            rows = report.total_rows(),
            batches = report.total_batches(),
            "materialization complete"
        );
        Ok(report)
    }

    fn materialize_one(
        &self,
        index: usize,
        total: usize,
        triple: &CandidateTriple,
    ) -> Result<DefinitionReport, RowFailure> {
        let definition = CandidateEventDefinition::try_from(*triple).map_err(|e| fail(None, e))?;
        let query = self.planner.plan(triple).ok_or_else(|| {
            fail(
                None,
                DefinitionError::NoQuery {
                    definition: *triple,
                },
            )
        })?;
        let expected_rows = self
            .reader
            .count_rows(&query)
            .map_err(|e| fail(None, e))?;

        tracing::info!(
            shape = %definition.shape(),
            { EXPECTED_ROWS } = expected_rows,
            "materializing definition"
        );
        self.dispatcher.emit_definition_started(&DefinitionStartedEvent {
            index,
            total,
            definition: *triple,
            expected_rows,
        });

        let mut run = DefinitionRun::new();
        if let Err(failure) = self.drive(index, &query, &mut run) {
            if let Some(tx) = run.tx.take() {
                if let Err(e) = tx.rollback() {
                    tracing::warn!(error = %e, "rollback after failure also failed");
                }
            }
            return Err(failure);
        }

        if run.rows != expected_rows {
            tracing::warn!(expected_rows, rows = run.rows, "row count changed during materialization");
        }
        let report = DefinitionReport {
            definition: *triple,
            expected_rows,
            rows: run.rows,
            activities_created: run.activities.len(),
            batches_committed: run.batches_committed,
        };
        self.dispatcher.emit_definition_complete(&DefinitionCompleteEvent {
            index,
            rows: report.rows,
            activities_created: report.activities_created,
            batches_committed: report.batches_committed,
        });
        Ok(report)
    }

    /// Page through the query, writing and committing as rows arrive.
    fn drive(
        &self,
        index: usize,
        query: &ReadQuery,
        run: &mut DefinitionRun<'a>,
    ) -> Result<(), RowFailure> {
        let mut cursor = RowKey::START;
        loop {
            let page = self
                .reader
                .fetch_rows(query, cursor, self.batch_size)
                .map_err(|e| fail(None, e))?;
            let Some(last) = page.last() else {
                break;
            };
            cursor = last.key;

            for row in &page {
                let position = run.rows + 1;
                self.write_row(run, row).map_err(|e| (Some(position), e))?;
                run.rows += 1;
                run.rows_in_batch += 1;
                if run.rows_in_batch == self.batch_size {
                    self.commit_batch(index, run)
                        .map_err(|e| fail(Some(position), e))?;
                }
            }

            if page.len() < self.batch_size {
                break;
            }
        }

        if run.rows_in_batch > 0 {
            self.commit_batch(index, run).map_err(|e| fail(None, e))?;
        }
        Ok(())
    }

    fn write_row(&self, run: &mut DefinitionRun<'a>, row: &SourceRow) -> Result<(), EventError> {
        let timestamp = row
            .timestamp_value
            .as_deref()
            .ok_or(TimestampParseError::Null)?;
        let millis = self.normalizer.parse_millis(timestamp)?;
        let name = row
            .activity_name
            .as_deref()
            .ok_or_else(|| EventError::InvalidRow {
                object_version_id: row.object_version_id,
                message: "activity name is NULL".to_string(),
            })?;

        if run.tx.is_none() {
            run.tx = Some(self.writer.begin()?);
        }
        let Some(tx) = run.tx.as_mut() else {
            return Err(StorageError::Transaction {
                message: "no open transaction".to_string(),
            }
            .into());
        };

        let activity_id = match run.activities.get(name) {
            Some(id) => *id,
            None => {
                let id = tx.insert_activity(name)?;
                run.activities.insert(name.to_string(), id);
                id
            }
        };
        let instance_id = tx.insert_activity_instance(activity_id)?;
        let event_id = tx.insert_event(instance_id, millis)?;
        tx.insert_event_link(event_id, row.object_version_id)?;
        Ok(())
    }

    fn commit_batch(&self, index: usize, run: &mut DefinitionRun<'a>) -> Result<(), StorageError> {
        let Some(tx) = run.tx.take() else {
            return Ok(());
        };
        let started = Instant::now();
        tx.commit()?;
        run.batches_committed += 1;

        tracing::debug!(
            batch = run.batches_committed,
            { BATCH_ROWS } = run.rows_in_batch,
            { BATCH_COMMIT_TIME } = started.elapsed().as_millis() as u64,
            "committed batch"
        );
        self.dispatcher.emit_batch_committed(&BatchCommittedEvent {
            index,
            batch: run.batches_committed,
            rows_in_batch: run.rows_in_batch,
            rows_so_far: run.rows,
        });
        run.rows_in_batch = 0;
        Ok(())
    }
}
