//! Feature records and the feature table

use crate::metric::{MetricName, MetricSet};
use bead_core::{SegmentRange, SourceFile};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Requested statistics of one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// File the segment came from
    pub source: SourceFile,
    /// 1-based bead number within the file
    pub sequence_number: usize,
    /// First sample of the segment (inclusive)
    pub start_index: usize,
    /// Last sample of the segment (inclusive)
    pub end_index: usize,
    /// Metric values keyed by name, one entry per requested metric
    pub values: BTreeMap<MetricName, f64>,
}

impl FeatureRecord {
    /// Create a record for `range`
    pub fn new(range: &SegmentRange, values: BTreeMap<MetricName, f64>) -> Self {
        Self {
            source: range.source.clone(),
            sequence_number: range.sequence_number,
            start_index: range.start_index,
            end_index: range.end_index,
            values,
        }
    }

    /// Value of one metric
    pub fn get(&self, metric: MetricName) -> Option<f64> {
        self.values.get(&metric).copied()
    }
}

/// Per-segment feature records sharing one metric schema
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureTable {
    metrics: MetricSet,
    records: Vec<FeatureRecord>,
}

impl FeatureTable {
    /// Empty table with the given metric columns
    pub fn new(metrics: MetricSet) -> Self {
        Self {
            metrics,
            records: Vec::new(),
        }
    }

    /// Table over existing records
    pub fn from_records(metrics: MetricSet, records: Vec<FeatureRecord>) -> Self {
        Self { metrics, records }
    }

    /// Metric columns in canonical order
    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    /// Rows of the table
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    /// Take ownership of the rows
    pub fn into_records(self) -> Vec<FeatureRecord> {
        self.records
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append rows
    pub fn extend(&mut self, records: impl IntoIterator<Item = FeatureRecord>) {
        self.records.extend(records);
    }

    /// All values of one metric column, NaN where a row lacks it
    pub fn column(&self, metric: MetricName) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| r.get(metric).unwrap_or(f64::NAN))
            .collect()
    }

    /// Distinct file names in first-seen order
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.source.file_name) {
                names.push(record.source.file_name.clone());
            }
        }
        names
    }

    /// Rows whose file name satisfies `keep`
    pub fn filter_files<F>(&self, mut keep: F) -> FeatureTable
    where
        F: FnMut(&str) -> bool,
    {
        FeatureTable {
            metrics: self.metrics.clone(),
            records: self
                .records
                .iter()
                .filter(|r| keep(&r.source.file_name))
                .cloned()
                .collect(),
        }
    }

    /// Order rows by position of their file in `file_order`, then bead number
    ///
    /// Files missing from `file_order` sort last, by identity.
    pub fn sort_canonical(&mut self, file_order: &[SourceFile]) {
        let rank: HashMap<&SourceFile, usize> =
            file_order.iter().enumerate().map(|(i, f)| (f, i)).collect();
        self.records.sort_by(|a, b| {
            let ra = rank.get(&a.source).copied().unwrap_or(usize::MAX);
            let rb = rank.get(&b.source).copied().unwrap_or(usize::MAX);
            ra.cmp(&rb)
                .then_with(|| a.source.cmp(&b.source))
                .then_with(|| a.sequence_number.cmp(&b.sequence_number))
        });
    }
}
