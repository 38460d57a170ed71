//! Two-step batch session: segment, then extract
//!
//! The session keeps what one stage hands to the next. `segment` reads the
//! filter column of every file and stores one [`Segmentation`] per file
//! slot. `extract` re-reads the value column and turns the stored ranges
//! into a [`FeatureTable`]. Per-file work fans out through the configured
//! execution strategy; results are merged back in file order.

use crate::config::{BeadConfig, FailurePolicy};
use bead_core::pipeline::{EXTRACTION_STAGE, SEGMENTATION_STAGE};
use bead_core::{
    engine_for, Error, EventBus, ExecutionEngine, PipelineContext, PipelineEvent, Result,
    SourceFile, TableSource,
};
use bead_features::{FeatureExtractor, FeatureRecord, FeatureTable};
use bead_report::{
    assemble, correlate, group_mean_by_file, AggregatedTable, CorrelationMatrix, FileSelection,
};
use bead_segment::{SegmentDetector, Segmentation, ThresholdSegmenter};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A file left out of a stage under [`FailurePolicy::SkipFile`]
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub source: SourceFile,
    pub stage: &'static str,
    pub error: String,
}

/// Counts describing the session state
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub files: usize,
    pub segmented_files: usize,
    pub total_segments: usize,
    pub feature_rows: usize,
    pub skipped: Vec<SkippedFile>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Files: {}", self.files)?;
        writeln!(f, "Segmented files: {}", self.segmented_files)?;
        writeln!(f, "Beads: {}", self.total_segments)?;
        writeln!(f, "Feature rows: {}", self.feature_rows)?;
        if !self.skipped.is_empty() {
            writeln!(f, "Skipped files: {}", self.skipped.len())?;
            for skipped in &self.skipped {
                writeln!(f, "  [{}] {}: {}", skipped.stage, skipped.source, skipped.error)?;
            }
        }
        Ok(())
    }
}

/// Batch state held between the segment and extract actions
pub struct BeadSession<S: TableSource> {
    source: S,
    config: BeadConfig,
    events: EventBus,
    context: PipelineContext,
    segmentations: Option<Vec<Segmentation>>,
    features: Option<FeatureTable>,
    skipped: Vec<SkippedFile>,
}

impl<S: TableSource> BeadSession<S> {
    /// Create a session over `source`
    pub fn new(source: S, config: BeadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            events: EventBus::new(),
            context: PipelineContext::new(),
            segmentations: None,
            features: None,
            skipped: Vec::new(),
        })
    }

    /// Use an existing event bus, e.g. one shared with other sessions
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &BeadConfig {
        &self.config
    }

    /// Replace the configuration; stored results are kept
    pub fn set_config(&mut self, config: BeadConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Bus receiving stage and progress events
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// Segmentations from the last successful `segment`, in file order
    pub fn segmentations(&self) -> Option<&[Segmentation]> {
        self.segmentations.as_deref()
    }

    /// Feature table from the last successful `extract`
    pub fn features(&self) -> Option<&FeatureTable> {
        self.features.as_ref()
    }

    /// Files skipped by the most recent runs of each stage
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Segment every file of the batch on the filter column
    ///
    /// Replaces any earlier segmentation. Under [`FailurePolicy::Abort`] the
    /// first failing file (in file order) fails the call and the previous
    /// state is left untouched.
    #[instrument(level = "info", skip(self), fields(trace_id = %self.context.trace_id))]
    pub fn segment(&mut self) -> Result<&[Segmentation]> {
        let started = Instant::now();
        let files = self.source.files();
        let trace_id = self.context.trace_id;
        self.events.publish(
            PipelineEvent::StageStarted {
                trace_id,
                stage: SEGMENTATION_STAGE,
                file_count: files.len(),
            },
            &self.context,
        );

        let filter = self.config.filter_column_ref();
        let segmenter = ThresholdSegmenter::new(self.config.filter_threshold);
        let engine = engine_for(self.config.execution);
        debug!(
            strategy = ?engine.strategy(),
            threads = engine.num_threads(),
            files = files.len(),
            "segmenting batch"
        );

        let source = &self.source;
        let events = &self.events;
        let context = &self.context;
        let outcomes: Vec<Result<Segmentation>> = engine.execute_batch(files.len(), |i| {
            let file = &files[i];
            let series = source.load_column(file, &filter)?;
            let segmentation = segmenter.detect(file, &series)?;
            events.publish(
                PipelineEvent::SegmentsDetected {
                    trace_id,
                    source: file.clone(),
                    segment_count: segmentation.count(),
                    sample_size: segmentation.sample_size(),
                },
                context,
            );
            Ok(segmentation)
        });

        let mut kept = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();
        for (file, outcome) in files.into_iter().zip(outcomes) {
            match outcome {
                Ok(segmentation) => kept.push(segmentation),
                Err(err) => {
                    self.on_failure(SEGMENTATION_STAGE, file, err, &mut skipped)?;
                }
            }
        }

        self.skipped = skipped;
        self.finish_stage(SEGMENTATION_STAGE, started);
        info!(
            files = kept.len(),
            beads = kept.iter().map(Segmentation::count).sum::<usize>(),
            "segmentation complete"
        );
        Ok(self.segmentations.insert(kept))
    }

    /// Compute the selected metrics for every stored segment
    ///
    /// The value column is read again from the source, so ranges that no
    /// longer fit the data fail with `OutOfRange`. Fails with `InvalidInput`
    /// if `segment` has not run.
    #[instrument(level = "info", skip(self), fields(trace_id = %self.context.trace_id))]
    pub fn extract(&mut self) -> Result<&FeatureTable> {
        let started = Instant::now();
        let trace_id = self.context.trace_id;
        let segmentations = self.segmentations.as_ref().ok_or_else(|| {
            Error::InvalidInput("No segmentation to extract from; run segment first".to_string())
        })?;
        let total = segmentations.len();
        self.events.publish(
            PipelineEvent::StageStarted {
                trace_id,
                stage: EXTRACTION_STAGE,
                file_count: total,
            },
            &self.context,
        );

        let value = self.config.value_column_ref();
        let extractor = FeatureExtractor::new(self.config.selected_features.clone());
        let engine = engine_for(self.config.execution);
        let completed = AtomicUsize::new(0);

        let source = &self.source;
        let events = &self.events;
        let context = &self.context;
        let outcomes: Vec<Result<Vec<FeatureRecord>>> = engine.execute_batch(total, |i| {
            let segmentation = &segmentations[i];
            let outcome = source
                .load_column(segmentation.source(), &value)
                .and_then(|series| extractor.extract(&series, segmentation.ranges()));
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            events.publish(
                PipelineEvent::ExtractionProgress {
                    trace_id,
                    completed: done,
                    total,
                },
                context,
            );
            outcome
        });

        let mut slots = Vec::with_capacity(total);
        let mut skipped: Vec<SkippedFile> = self
            .skipped
            .iter()
            .filter(|s| s.stage != EXTRACTION_STAGE)
            .cloned()
            .collect();
        for (segmentation, outcome) in segmentations.iter().zip(outcomes) {
            match outcome {
                Ok(records) => slots.push(records),
                Err(err) => {
                    let file = segmentation.source().clone();
                    self.on_failure(EXTRACTION_STAGE, file, err, &mut skipped)?;
                }
            }
        }

        let table = assemble(self.config.selected_features.clone(), slots);
        self.skipped = skipped;
        self.finish_stage(EXTRACTION_STAGE, started);
        info!(rows = table.len(), metrics = %table.metrics(), "extraction complete");
        Ok(self.features.insert(table))
    }

    /// Segment and extract in one call
    pub fn run(&mut self) -> Result<&FeatureTable> {
        self.segment()?;
        self.extract()
    }

    /// Per-file means of the stored feature table
    pub fn aggregated(&self) -> Result<AggregatedTable> {
        Ok(group_mean_by_file(self.require_features()?))
    }

    /// Correlation matrix over the configured file selection
    pub fn correlation(&self) -> Result<CorrelationMatrix> {
        let selection = FileSelection::from_names(self.config.correlation_files.clone());
        correlate(self.require_features()?, &selection, self.config.aggregation)
    }

    /// Drop all stored results
    pub fn reset(&mut self) {
        self.segmentations = None;
        self.features = None;
        self.skipped.clear();
        self.context = PipelineContext::new();
    }

    pub fn summary(&self) -> SessionSummary {
        let segmentations = self.segmentations.as_deref().unwrap_or_default();
        SessionSummary {
            files: self.source.files().len(),
            segmented_files: segmentations.len(),
            total_segments: segmentations.iter().map(Segmentation::count).sum(),
            feature_rows: self.features.as_ref().map_or(0, FeatureTable::len),
            skipped: self.skipped.clone(),
        }
    }

    fn require_features(&self) -> Result<&FeatureTable> {
        self.features.as_ref().ok_or_else(|| {
            Error::InvalidInput("No features extracted; run extract first".to_string())
        })
    }

    fn on_failure(
        &self,
        stage: &'static str,
        file: SourceFile,
        err: Error,
        skipped: &mut Vec<SkippedFile>,
    ) -> Result<()> {
        let trace_id = self.context.trace_id;
        match self.config.failure_policy {
            FailurePolicy::Abort => {
                self.events.publish(
                    PipelineEvent::PipelineError {
                        trace_id,
                        stage,
                        error: format!("{file}: {err}"),
                    },
                    &self.context,
                );
                Err(err)
            }
            FailurePolicy::SkipFile => {
                warn!(%file, error = %err, stage, "skipping file");
                self.events.publish(
                    PipelineEvent::FileSkipped {
                        trace_id,
                        stage,
                        source: file.clone(),
                        error: err.to_string(),
                    },
                    &self.context,
                );
                skipped.push(SkippedFile {
                    source: file,
                    stage,
                    error: err.to_string(),
                });
                Ok(())
            }
        }
    }

    fn finish_stage(&mut self, stage: &'static str, started: Instant) {
        let duration = started.elapsed();
        self.context.record_stage_timing(stage, duration);
        self.events.publish(
            PipelineEvent::StageCompleted {
                trace_id: self.context.trace_id,
                stage,
                duration,
            },
            &self.context,
        );
    }
}

impl<S: TableSource + fmt::Debug> fmt::Debug for BeadSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeadSession")
            .field("source", &self.source)
            .field("config", &self.config)
            .field("trace_id", &self.context.trace_id)
            .field("segmented_files", &self.segmentations.as_ref().map(Vec::len))
            .field("feature_rows", &self.features.as_ref().map(FeatureTable::len))
            .finish()
    }
}
