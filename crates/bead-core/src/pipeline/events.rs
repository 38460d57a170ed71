//! Event-based pipeline notification system
//!
//! Observers (progress bars, logging, counters) subscribe to an `EventBus`
//! and watch segmentation and extraction runs without the stages knowing
//! who is listening.

use super::context::PipelineContext;
use crate::error::{Error, Result};
use crate::types::SourceFile;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Name of the segmentation stage in events and timings
pub const SEGMENTATION_STAGE: &str = "segmentation";
/// Name of the extraction stage in events and timings
pub const EXTRACTION_STAGE: &str = "extraction";

/// Event emitted while a batch runs
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A stage started over a batch of files
    StageStarted {
        trace_id: Uuid,
        stage: &'static str,
        file_count: usize,
    },

    /// Segmentation of one file finished
    SegmentsDetected {
        trace_id: Uuid,
        source: SourceFile,
        segment_count: usize,
        sample_size: usize,
    },

    /// Extraction progress, one event per finished file
    ExtractionProgress {
        trace_id: Uuid,
        completed: usize,
        total: usize,
    },

    /// A file failed and was left out of the batch
    FileSkipped {
        trace_id: Uuid,
        stage: &'static str,
        source: SourceFile,
        error: String,
    },

    /// A stage finished over the whole batch
    StageCompleted {
        trace_id: Uuid,
        stage: &'static str,
        duration: Duration,
    },

    /// A stage aborted
    PipelineError {
        trace_id: Uuid,
        stage: &'static str,
        error: String,
    },
}

/// Trait for handling pipeline events
pub trait EventHandler: Send + Sync {
    /// Handle a pipeline event
    fn handle_event(&self, event: &PipelineEvent, context: &PipelineContext);

    /// Check if this handler is interested in a particular event type
    fn is_interested(&self, event: &PipelineEvent) -> bool {
        let _ = event;
        true
    }

    /// Get the name of this handler for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Event bus for distributing events to multiple handlers
pub struct EventBus {
    handlers: Arc<Mutex<Vec<Box<dyn EventHandler>>>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register an event handler
    pub fn register<H>(&self, handler: H) -> Result<()>
    where
        H: EventHandler + 'static,
    {
        let mut handlers = self
            .handlers
            .lock()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to lock handlers: {e}")))?;
        handlers.push(Box::new(handler));
        Ok(())
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: PipelineEvent, context: &PipelineContext) -> Result<()> {
        let handlers = self
            .handlers
            .lock()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to lock handlers: {e}")))?;

        for handler in handlers.iter() {
            if handler.is_interested(&event) {
                handler.handle_event(&event, context);
            }
        }

        Ok(())
    }

    /// Emit and drop any bus failure; observers never fail a stage
    pub fn publish(&self, event: PipelineEvent, context: &PipelineContext) {
        if let Err(e) = self.emit(event, context) {
            log::warn!("Dropped pipeline event: {e}");
        }
    }

    /// Get the number of registered handlers
    pub fn handler_count(&self) -> Result<usize> {
        let handlers = self
            .handlers
            .lock()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to lock handlers: {e}")))?;
        Ok(handlers.len())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count().unwrap_or(0))
            .finish()
    }
}

/// Simple logging event handler
pub struct LoggingHandler {
    level: log::Level,
}

impl LoggingHandler {
    /// Create a new logging handler
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl EventHandler for LoggingHandler {
    fn handle_event(&self, event: &PipelineEvent, _context: &PipelineContext) {
        match event {
            PipelineEvent::StageStarted { trace_id, stage, file_count } => {
                log::log!(self.level, "{stage} started over {file_count} files (trace: {trace_id})");
            }
            PipelineEvent::StageCompleted { trace_id, stage, duration } => {
                log::log!(self.level, "{stage} completed in {duration:?} (trace: {trace_id})");
            }
            PipelineEvent::FileSkipped { trace_id, stage, source, error } => {
                log::warn!("{stage} skipped {source}: {error} (trace: {trace_id})");
            }
            PipelineEvent::PipelineError { trace_id, stage, error } => {
                log::error!("Pipeline error in {stage}: {error} (trace: {trace_id})");
            }
            _ => {
                log::trace!("Pipeline event: {event:?}");
            }
        }
    }
}

/// Counters collected from pipeline events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineMetrics {
    pub total_runs: usize,
    pub files_segmented: usize,
    pub total_segments: usize,
    pub files_extracted: usize,
    pub skipped_files: usize,
    pub errors: HashMap<String, usize>,
}

/// Metrics collection handler
#[derive(Clone, Default)]
pub struct MetricsHandler {
    metrics: Arc<Mutex<PipelineMetrics>>,
}

impl MetricsHandler {
    /// Create a new metrics handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of current metrics
    pub fn snapshot(&self) -> Result<PipelineMetrics> {
        let metrics = self
            .metrics
            .lock()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to lock metrics: {e}")))?;
        Ok(metrics.clone())
    }
}

impl EventHandler for MetricsHandler {
    fn handle_event(&self, event: &PipelineEvent, _context: &PipelineContext) {
        let Ok(mut metrics) = self.metrics.lock() else {
            log::error!("Failed to lock metrics");
            return;
        };

        match event {
            PipelineEvent::StageStarted { .. } => {
                metrics.total_runs += 1;
            }
            PipelineEvent::SegmentsDetected { segment_count, .. } => {
                metrics.files_segmented += 1;
                metrics.total_segments += segment_count;
            }
            PipelineEvent::ExtractionProgress { .. } => {
                metrics.files_extracted += 1;
            }
            PipelineEvent::FileSkipped { .. } => {
                metrics.skipped_files += 1;
            }
            PipelineEvent::PipelineError { stage, .. } => {
                *metrics.errors.entry(stage.to_string()).or_insert(0) += 1;
            }
            PipelineEvent::StageCompleted { .. } => {}
        }
    }
}

/// Null event handler that does nothing
#[derive(Default, Clone)]
pub struct NullEventHandler;

impl EventHandler for NullEventHandler {
    fn handle_event(&self, _event: &PipelineEvent, _context: &PipelineContext) {}

    fn is_interested(&self, _event: &PipelineEvent) -> bool {
        false
    }
}
