//! Per-file averaging of feature records
//!
//! Every metric column is averaged over the segments of one `file_name`.
//! NaN entries are skipped; a file whose entries are all NaN for a metric
//! reports NaN for it.

use bead_features::{FeatureTable, MetricName, MetricSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Averaged metrics of one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    /// Grouping key
    pub file_name: String,
    /// Number of segments averaged
    pub segment_count: usize,
    /// Mean of each metric over the file's segments
    pub values: BTreeMap<MetricName, f64>,
}

impl AggregatedRow {
    /// Averaged value of one metric
    pub fn get(&self, metric: MetricName) -> Option<f64> {
        self.values.get(&metric).copied()
    }
}

/// One row per file, sorted by file name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedTable {
    metrics: MetricSet,
    rows: Vec<AggregatedRow>,
}

impl AggregatedTable {
    /// Metric columns in canonical order
    pub fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    /// Rows sorted by file name
    pub fn rows(&self) -> &[AggregatedRow] {
        &self.rows
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no file contributed a segment
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for one file
    pub fn row(&self, file_name: &str) -> Option<&AggregatedRow> {
        self.rows.iter().find(|r| r.file_name == file_name)
    }

    /// All values of one metric column, NaN where a row lacks it
    pub fn column(&self, metric: MetricName) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| r.get(metric).unwrap_or(f64::NAN))
            .collect()
    }
}

impl fmt::Display for AggregatedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<24} {:>8}", "file_name", "beads")?;
        for metric in self.metrics.iter() {
            write!(f, " {:>12}", metric.as_str())?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "{:<24} {:>8}", row.file_name, row.segment_count)?;
            for metric in self.metrics.iter() {
                write!(f, " {:>12.6}", row.get(metric).unwrap_or(f64::NAN))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Accumulator {
    segments: usize,
    sums: BTreeMap<MetricName, (f64, usize)>,
}

/// Average every metric over the segments of each file
pub fn group_mean_by_file(table: &FeatureTable) -> AggregatedTable {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for record in table.records() {
        let acc = groups.entry(record.source.file_name.as_str()).or_default();
        acc.segments += 1;
        for metric in table.metrics().iter() {
            let slot = acc.sums.entry(metric).or_insert((0.0, 0));
            match record.get(metric) {
                Some(v) if !v.is_nan() => {
                    slot.0 += v;
                    slot.1 += 1;
                }
                _ => {}
            }
        }
    }

    let rows: Vec<AggregatedRow> = groups
        .into_iter()
        .map(|(file_name, acc)| AggregatedRow {
            file_name: file_name.to_string(),
            segment_count: acc.segments,
            values: acc
                .sums
                .into_iter()
                .map(|(metric, (sum, n))| {
                    let mean = if n == 0 { f64::NAN } else { sum / n as f64 };
                    (metric, mean)
                })
                .collect(),
        })
        .collect();

    debug!(files = rows.len(), segments = table.len(), "grouped features by file");

    AggregatedTable {
        metrics: table.metrics().clone(),
        rows,
    }
}

/// Per-file averaging on a feature table
pub trait GroupMeanExt {
    /// Average every metric over the segments of each file
    fn group_mean_by_file(&self) -> AggregatedTable;
}

impl GroupMeanExt for FeatureTable {
    fn group_mean_by_file(&self) -> AggregatedTable {
        group_mean_by_file(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bead_core::{SegmentRange, SourceFile};
    use bead_features::FeatureRecord;

    fn record(file: &str, seq: usize, mean: f64, max: f64) -> FeatureRecord {
        let range = SegmentRange::new(SourceFile::named(file), seq, 0, 0);
        FeatureRecord::new(
            &range,
            BTreeMap::from([(MetricName::Mean, mean), (MetricName::Max, max)]),
        )
    }

    fn table(records: Vec<FeatureRecord>) -> FeatureTable {
        FeatureTable::from_records(MetricSet::parse_list("mean,max").unwrap(), records)
    }

    #[test]
    fn test_group_mean_sorted_by_file_name() {
        let t = table(vec![
            record("b.csv", 1, 2.0, 4.0),
            record("a.csv", 1, 1.0, 1.0),
            record("b.csv", 2, 4.0, 8.0),
        ]);
        let agg = t.group_mean_by_file();

        let names: Vec<&str> = agg.rows().iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);

        let b = agg.row("b.csv").unwrap();
        assert_eq!(b.segment_count, 2);
        assert_relative_eq!(b.get(MetricName::Mean).unwrap(), 3.0);
        assert_relative_eq!(b.get(MetricName::Max).unwrap(), 6.0);
        assert_eq!(agg.column(MetricName::Mean), vec![1.0, 3.0]);
    }

    #[test]
    fn test_nan_skipped_and_all_nan_is_nan() {
        let t = table(vec![
            record("a.csv", 1, f64::NAN, f64::NAN),
            record("a.csv", 2, 5.0, f64::NAN),
        ]);
        let agg = group_mean_by_file(&t);
        let a = agg.row("a.csv").unwrap();
        assert_eq!(a.get(MetricName::Mean), Some(5.0));
        assert!(a.get(MetricName::Max).unwrap().is_nan());
    }

    #[test]
    fn test_empty_table() {
        let agg = table(Vec::new()).group_mean_by_file();
        assert!(agg.is_empty());
        assert_eq!(agg.metrics().len(), 2);
    }

    #[test]
    fn test_display_has_header_and_rows() {
        let agg = table(vec![record("a.csv", 1, 1.0, 2.0)]).group_mean_by_file();
        let text = agg.to_string();
        assert!(text.lines().next().unwrap().contains("mean"));
        assert!(text.contains("a.csv"));
        assert_eq!(text.lines().count(), 2);
    }
}
