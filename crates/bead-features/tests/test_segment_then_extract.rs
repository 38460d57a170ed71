//! Segmentation feeding extraction, end to end over in-memory series

mod common;

use bead_core::{Series, SourceFile};
use bead_features::{extract, FeatureExtractor, MetricName, MetricSet};
use bead_segment::{segment, SegmentDetector, ThresholdSegmenter};
use common::*;
use proptest::prelude::*;

#[test]
fn test_reference_pipeline() {
    let source = SourceFile::named("a.csv");
    let series = reference_series();
    let ranges = ThresholdSegmenter::new(2.0)
        .detect(&source, &series)
        .unwrap()
        .into_ranges();

    let metrics = MetricSet::parse_list("mean,max").unwrap();
    let records = extract(&series, &ranges, &metrics).unwrap();

    let means: Vec<f64> = records.iter().map(|r| r.get(MetricName::Mean).unwrap()).collect();
    assert_eq!(means, vec![5.0, 3.0, 6.0]);
    assert_eq!(records[2].get(MetricName::Max), Some(6.0));
    assert_eq!(records[2].sequence_number, 3);
}

#[test]
fn test_value_column_differs_from_filter_column() {
    let source = SourceFile::named("a.csv");
    let filter = reference_series();
    let value = Series::from((0..10).map(|i| i as f64).collect::<Vec<_>>());

    let ranges = segment(&source, &filter, 2.0);
    let records = FeatureExtractor::new(MetricSet::parse_list("mean,median").unwrap())
        .extract(&value, &ranges)
        .unwrap();

    assert_relative_eq!(records[0].get(MetricName::Mean).unwrap(), 1.5);
    assert_relative_eq!(records[1].get(MetricName::Median).unwrap(), 4.0);
    assert_relative_eq!(records[2].get(MetricName::Mean).unwrap(), 8.0);
}

#[test]
fn test_stale_ranges_after_data_shrinks() {
    let source = SourceFile::named("a.csv");
    let ranges = segment(&source, &reference_series(), 2.0);
    let shrunk = Series::from(vec![1.0; 8]);
    assert!(extract(&shrunk, &ranges, &MetricSet::all()).is_err());
}

#[test]
fn test_no_segments_yield_empty_records() {
    let source = SourceFile::named("a.csv");
    let series = Series::from(vec![0.0, 1.0, 2.0]);
    let ranges = segment(&source, &series, 10.0);
    assert!(ranges.is_empty());
    assert!(extract(&series, &ranges, &MetricSet::all()).unwrap().is_empty());
}

proptest! {
    // Property: variance and std are non-negative and consistent, min <= median <= max
    #[test]
    fn prop_metric_relationships(
        values in prop::collection::vec(-1e3..1e3f64, 1..100),
        threshold in -1e3..1e3f64,
    ) {
        let source = SourceFile::named("p.csv");
        let series = Series::from(values);
        let ranges = segment(&source, &series, threshold);
        let records = extract(&series, &ranges, &MetricSet::all()).unwrap();
        prop_assert_eq!(records.len(), ranges.len());

        for record in &records {
            let var = record.get(MetricName::Var).unwrap();
            let std = record.get(MetricName::Std).unwrap();
            let min = record.get(MetricName::Min).unwrap();
            let max = record.get(MetricName::Max).unwrap();
            let median = record.get(MetricName::Median).unwrap();
            let mean = record.get(MetricName::Mean).unwrap();

            prop_assert!(var >= 0.0);
            prop_assert!((std * std - var).abs() <= 1e-6 * var.max(1.0));
            prop_assert!(min <= median && median <= max);
            prop_assert!(min - 1e-9 <= mean && mean <= max + 1e-9);
            prop_assert!(min > threshold);
        }
    }

    // Property: single-sample segments have zero spread and NaN shape
    #[test]
    fn prop_single_sample_policy(value in -1e6..1e6f64) {
        let source = SourceFile::named("p.csv");
        let series = Series::from(vec![value]);
        let ranges = segment(&source, &series, value - 1.0);
        let records = extract(&series, &ranges, &MetricSet::all()).unwrap();
        prop_assert_eq!(records[0].get(MetricName::Std), Some(0.0));
        prop_assert_eq!(records[0].get(MetricName::Var), Some(0.0));
        prop_assert!(records[0].get(MetricName::Skewness).unwrap().is_nan());
        prop_assert!(records[0].get(MetricName::Kurtosis).unwrap().is_nan());
    }
}
