//! Pipeline execution context
//!
//! The PipelineContext flows through the segmentation and extraction stages,
//! carrying the run's trace id and the time each stage took.

use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

/// Context that flows through one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Unique trace ID for this run
    pub trace_id: Uuid,
    stage_timings: HashMap<String, Duration>,
}

impl PipelineContext {
    /// Create a new pipeline context
    pub fn new() -> Self {
        Self::with_trace_id(Uuid::new_v4())
    }

    /// Create a context with a specific trace ID
    pub fn with_trace_id(trace_id: Uuid) -> Self {
        Self {
            trace_id,
            stage_timings: HashMap::new(),
        }
    }

    /// Record timing for a stage
    pub fn record_stage_timing(&mut self, stage: impl Into<String>, duration: Duration) {
        self.stage_timings.insert(stage.into(), duration);
    }

    /// Get timing for a stage
    pub fn stage_timing(&self, stage: &str) -> Option<Duration> {
        self.stage_timings.get(stage).copied()
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new()
    }
}
