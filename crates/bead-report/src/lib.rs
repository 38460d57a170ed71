//! Aggregation and correlation reports over bead feature tables
//!
//! Per-file feature records are merged into one [`FeatureTable`] by
//! [`assemble`], optionally averaged per file with
//! [`GroupMeanExt::group_mean_by_file`], and summarized as a Pearson
//! [`CorrelationMatrix`] across the metric columns of a [`FileSelection`].
//!
//! ```rust
//! use bead_core::{SegmentRange, Series, SourceFile};
//! use bead_features::{extract, MetricSet};
//! use bead_report::{correlate, FileSelection};
//!
//! let series = Series::from(vec![1.0, 2.0, 0.0, 4.0, 9.0, 0.0, 2.0, 2.5]);
//! let source = SourceFile::named("run.csv");
//! let ranges = vec![
//!     SegmentRange::new(source.clone(), 1, 0, 1),
//!     SegmentRange::new(source.clone(), 2, 3, 4),
//!     SegmentRange::new(source, 3, 6, 7),
//! ];
//! let metrics: MetricSet = "mean,max".parse().unwrap();
//! let records = extract(&series, &ranges, &metrics).unwrap();
//!
//! let table = bead_report::assemble(metrics, vec![records]);
//! let matrix = correlate(&table, &FileSelection::All, false).unwrap();
//! assert_eq!(matrix.dim(), 2);
//! ```

pub mod aggregate;
pub mod correlation;
pub mod selection;

pub use aggregate::{group_mean_by_file, AggregatedRow, AggregatedTable, GroupMeanExt};
pub use correlation::{correlate, pearson, CorrelationMatrix};
pub use selection::FileSelection;

use bead_features::{FeatureRecord, FeatureTable, MetricSet};

/// Merge per-file record lists into one table, in slot order
pub fn assemble<I>(metrics: MetricSet, slots: I) -> FeatureTable
where
    I: IntoIterator<Item = Vec<FeatureRecord>>,
{
    let mut table = FeatureTable::new(metrics);
    for records in slots {
        table.extend(records);
    }
    table
}
