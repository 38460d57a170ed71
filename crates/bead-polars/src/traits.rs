//! Bead segmentation and feature extraction on Polars DataFrames

use crate::export::feature_table_to_dataframe;
use crate::reader::numeric_series;
use crate::Result;
use bead_core::{ColumnRef, Series, SourceFile};
use bead_features::{FeatureExtractor, MetricSet};
use bead_segment::segment;
use polars::prelude::*;

/// Extension trait for bead operations on Polars DataFrames
pub trait BeadStatsExt {
    /// Read one column as a numeric series
    ///
    /// Fails if the column is absent or holds a missing or non-numeric
    /// entry.
    fn bead_series(&self, column: &ColumnRef) -> Result<Series>;

    /// Segment the frame on `filter_column`
    ///
    /// # Returns
    /// DataFrame with columns `file_name`, `bead_number`, `start_index` and
    /// `end_index`, one row per bead
    fn segment_beads(
        &self,
        source: &SourceFile,
        filter_column: &ColumnRef,
        threshold: f64,
    ) -> Result<DataFrame>;

    /// Segment on `filter_column` and summarize `value_column` per bead
    ///
    /// # Returns
    /// DataFrame with columns `file_dir`, `file_name`, `bead_number` and one
    /// column per metric
    fn bead_features(
        &self,
        source: &SourceFile,
        filter_column: &ColumnRef,
        value_column: &ColumnRef,
        threshold: f64,
        metrics: &MetricSet,
    ) -> Result<DataFrame>;
}

impl BeadStatsExt for DataFrame {
    fn bead_series(&self, column: &ColumnRef) -> Result<Series> {
        numeric_series(self, column, "dataframe")
    }

    fn segment_beads(
        &self,
        source: &SourceFile,
        filter_column: &ColumnRef,
        threshold: f64,
    ) -> Result<DataFrame> {
        let series = self.bead_series(filter_column)?;
        let ranges = segment(source, &series, threshold);

        let df = DataFrame::new(vec![
            Column::new(
                "file_name".into(),
                vec![source.file_name.clone(); ranges.len()],
            ),
            Column::new(
                "bead_number".into(),
                ranges.iter().map(|r| r.sequence_number as u64).collect::<Vec<_>>(),
            ),
            Column::new(
                "start_index".into(),
                ranges.iter().map(|r| r.start_index as u64).collect::<Vec<_>>(),
            ),
            Column::new(
                "end_index".into(),
                ranges.iter().map(|r| r.end_index as u64).collect::<Vec<_>>(),
            ),
        ])?;
        Ok(df)
    }

    fn bead_features(
        &self,
        source: &SourceFile,
        filter_column: &ColumnRef,
        value_column: &ColumnRef,
        threshold: f64,
        metrics: &MetricSet,
    ) -> Result<DataFrame> {
        let filter = self.bead_series(filter_column)?;
        let ranges = segment(source, &filter, threshold);
        let values = self.bead_series(value_column)?;
        let table = FeatureExtractor::new(metrics.clone()).extract_table(&values, &ranges)?;
        feature_table_to_dataframe(&table)
    }
}
