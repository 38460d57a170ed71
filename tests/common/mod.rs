//! Shared utilities for session tests

use bead_core::{EventHandler, InMemorySource, PipelineContext, PipelineEvent, SourceFile};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// The reference trace, thresholded at 2.0 into beads (1,2), (4,4), (7,9)
pub const REFERENCE: [f64; 10] = [0.0, 5.0, 5.0, 0.0, 3.0, 0.0, 0.0, 6.0, 6.0, 6.0];

/// Source with `count` files whose `Current` column is a shifted copy of
/// the reference trace and whose first column `Value` counts samples
pub fn generated_source(count: usize) -> InMemorySource {
    let mut source = InMemorySource::new();
    for k in 0..count {
        let current: Vec<f64> = REFERENCE
            .iter()
            .cycle()
            .skip(k % REFERENCE.len())
            .take(REFERENCE.len() * (1 + k % 3))
            .copied()
            .collect();
        let value: Vec<f64> = (0..current.len()).map(|i| (i * (k + 1)) as f64).collect();
        source.insert(
            SourceFile::new(format!("batch/run_{k:02}.csv"), format!("run_{k:02}.csv")),
            vec![("Value".to_string(), value), ("Current".to_string(), current)],
        );
    }
    source
}

/// Write a CSV with `Value` first and `Current` second
pub fn write_trace(dir: &Path, name: &str, value: &[f64], current: &[f64]) -> PathBuf {
    let mut text = String::from("Value,Current\n");
    for (v, c) in value.iter().zip(current) {
        text.push_str(&format!("{v},{c}\n"));
    }
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// Handler recording every event it sees
#[derive(Clone, Default)]
pub struct RecordingHandler {
    pub events: Arc<Mutex<Vec<PipelineEvent>>>,
}

impl RecordingHandler {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventHandler for RecordingHandler {
    fn handle_event(&self, event: &PipelineEvent, _context: &PipelineContext) {
        self.events.lock().unwrap().push(event.clone());
    }
}
