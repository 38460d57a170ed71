//! Conversion of reports to DataFrames and CSV output
//!
//! Feature frames carry `file_dir`, `file_name`, `bead_number` and then one
//! column per selected metric in canonical order. Correlation frames lead
//! with a `feature` label column. CSV output has a header row and no index
//! column; NaN is written as `NaN`.

use crate::Result;
use bead_features::FeatureTable;
use bead_report::{AggregatedTable, CorrelationMatrix};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// One row per segment
pub fn feature_table_to_dataframe(table: &FeatureTable) -> Result<DataFrame> {
    let records = table.records();
    let mut columns = vec![
        Column::new(
            "file_dir".into(),
            records.iter().map(|r| r.source.file_dir.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "file_name".into(),
            records.iter().map(|r| r.source.file_name.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "bead_number".into(),
            records.iter().map(|r| r.sequence_number as u64).collect::<Vec<_>>(),
        ),
    ];
    for metric in table.metrics().iter() {
        columns.push(Column::new(metric.as_str().into(), table.column(metric)));
    }
    Ok(DataFrame::new(columns)?)
}

/// One row per file with its segment count and metric means
pub fn aggregated_table_to_dataframe(table: &AggregatedTable) -> Result<DataFrame> {
    let rows = table.rows();
    let mut columns = vec![
        Column::new(
            "file_name".into(),
            rows.iter().map(|r| r.file_name.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "bead_count".into(),
            rows.iter().map(|r| r.segment_count as u64).collect::<Vec<_>>(),
        ),
    ];
    for metric in table.metrics().iter() {
        columns.push(Column::new(metric.as_str().into(), table.column(metric)));
    }
    Ok(DataFrame::new(columns)?)
}

/// Square matrix with a leading `feature` label column
pub fn correlation_to_dataframe(matrix: &CorrelationMatrix) -> Result<DataFrame> {
    let labels = matrix.labels();
    let mut columns = vec![Column::new(
        "feature".into(),
        labels.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
    )];
    for (j, metric) in labels.iter().enumerate() {
        let values: Vec<f64> = matrix.values().column(j).iter().copied().collect();
        columns.push(Column::new(metric.as_str().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

/// Write `df` as UTF-8 CSV with a header row
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    info!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bead_core::{SegmentRange, SourceFile};
    use bead_features::{FeatureRecord, MetricName, MetricSet};
    use bead_report::GroupMeanExt;
    use std::collections::BTreeMap;

    fn table() -> FeatureTable {
        let metrics = MetricSet::parse_list("max,mean").unwrap();
        let records = (1..=2)
            .map(|seq| {
                let range = SegmentRange::new(SourceFile::new("in/a.csv", "a.csv"), seq, 0, 0);
                FeatureRecord::new(
                    &range,
                    BTreeMap::from([
                        (MetricName::Mean, seq as f64),
                        (MetricName::Max, 10.0 * seq as f64),
                    ]),
                )
            })
            .collect();
        FeatureTable::from_records(metrics, records)
    }

    #[test]
    fn test_feature_frame_columns() {
        let df = feature_table_to_dataframe(&table()).unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["file_dir", "file_name", "bead_number", "mean", "max"]);
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("max").unwrap().f64().unwrap().get(1), Some(20.0));
        assert_eq!(df.column("bead_number").unwrap().u64().unwrap().get(0), Some(1));
    }

    #[test]
    fn test_empty_feature_frame_keeps_schema() {
        let empty = FeatureTable::new(MetricSet::parse_list("median").unwrap());
        let df = feature_table_to_dataframe(&empty).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn test_aggregated_frame() {
        let df = aggregated_table_to_dataframe(&table().group_mean_by_file()).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("mean").unwrap().f64().unwrap().get(0), Some(1.5));
        assert_eq!(df.column("bead_count").unwrap().u64().unwrap().get(0), Some(2));
    }

    #[test]
    fn test_correlation_frame() {
        let matrix = CorrelationMatrix::from_columns(&[
            (MetricName::Mean, vec![1.0, 2.0, 3.0]),
            (MetricName::Max, vec![3.0, 2.0, 1.0]),
        ]);
        let df = correlation_to_dataframe(&matrix).unwrap();
        assert_eq!(df.width(), 3);
        assert_eq!(df.column("feature").unwrap().str().unwrap().get(1), Some("max"));
        assert_eq!(df.column("mean").unwrap().f64().unwrap().get(1), Some(-1.0));
    }
}
