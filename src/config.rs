//! Batch configuration
//!
//! Loadable from JSON; every field is optional and falls back to its
//! default:
//!
//! ```json
//! {
//!   "filter_column": "Current",
//!   "value_column": null,
//!   "filter_threshold": 0.0,
//!   "selected_features": ["mean", "max"],
//!   "aggregation": false,
//!   "correlation_files": null,
//!   "failure_policy": "abort",
//!   "execution": "parallel"
//! }
//! ```

use bead_core::{ColumnRef, Error, ExecutionStrategy, Result};
use bead_features::MetricSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// What a stage does when one file of the batch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the stage and return the first failure in file order
    #[default]
    Abort,
    /// Leave the file out, log it and record it in the session summary
    SkipFile,
}

/// Settings for one segmentation and extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeadConfig {
    /// Column thresholded to find beads; empty selects the first column
    pub filter_column: String,
    /// Column summarized per bead; `None` selects the first column
    pub value_column: Option<String>,
    /// Samples strictly above this value belong to a bead
    pub filter_threshold: f64,
    /// Metrics computed per bead
    pub selected_features: MetricSet,
    /// Average beads per file before correlating
    pub aggregation: bool,
    /// Files (by name) entering the correlation; `None` selects all
    pub correlation_files: Option<Vec<String>>,
    pub failure_policy: FailurePolicy,
    pub execution: ExecutionStrategy,
}

impl Default for BeadConfig {
    fn default() -> Self {
        Self {
            filter_column: String::new(),
            value_column: None,
            filter_threshold: 0.0,
            selected_features: MetricSet::all(),
            aggregation: false,
            correlation_files: None,
            failure_policy: FailurePolicy::Abort,
            execution: ExecutionStrategy::default(),
        }
    }
}

impl BeadConfig {
    /// Default configuration thresholding `filter_column`
    pub fn new(filter_column: impl Into<String>) -> Self {
        Self {
            filter_column: filter_column.into(),
            ..Self::default()
        }
    }

    /// Load from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            Error::InvalidParameter(format!("Bad configuration in {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no batch can run with
    pub fn validate(&self) -> Result<()> {
        if self.filter_threshold.is_nan() {
            return Err(Error::InvalidParameter(
                "filter_threshold must be a number".to_string(),
            ));
        }
        Ok(())
    }

    /// Column reference for the thresholded series
    pub fn filter_column_ref(&self) -> ColumnRef {
        if self.filter_column.is_empty() {
            ColumnRef::FIRST
        } else {
            ColumnRef::Named(self.filter_column.clone())
        }
    }

    /// Column reference for the summarized series
    pub fn value_column_ref(&self) -> ColumnRef {
        match &self.value_column {
            Some(name) if !name.is_empty() => ColumnRef::Named(name.clone()),
            _ => ColumnRef::FIRST,
        }
    }
}
