//! Threshold run-length segmentation
//!
//! A bead is a maximal run of consecutive samples strictly greater than the
//! threshold. Runs are reported with inclusive bounds in the order they are
//! found, numbered from 1 within each file. There is no minimum length and
//! no merging: a single sample at or below the threshold splits two runs.

use crate::state::ThresholdRuns;
use crate::traits::{SegmentDetector, SegmentDetectorProperties};
use crate::types::Segmentation;
use bead_core::{Result, SegmentRange, Series, SourceFile};
use tracing::{debug, instrument};

/// Inclusive `(start, end)` bounds of every run of `values` above `threshold`
pub fn segment_bounds(values: &[f64], threshold: f64) -> Vec<(usize, usize)> {
    ThresholdRuns::new(values, threshold).collect()
}

/// Segment a series into numbered ranges for `source`
pub fn segment(source: &SourceFile, series: &Series, threshold: f64) -> Vec<SegmentRange> {
    ThresholdRuns::new(series.as_slice(), threshold)
        .enumerate()
        .map(|(i, (start, end))| SegmentRange::new(source.clone(), i + 1, start, end))
        .collect()
}

/// Threshold crossing detector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSegmenter {
    /// Samples strictly above this value belong to a bead
    threshold: f64,
}

impl ThresholdSegmenter {
    /// Create a new threshold segmenter
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl SegmentDetectorProperties for ThresholdSegmenter {
    fn algorithm_name(&self) -> &'static str {
        "Threshold"
    }
}

impl SegmentDetector for ThresholdSegmenter {
    #[instrument(level = "debug", skip(self, series), fields(file = %source.file_name, threshold = self.threshold))]
    fn detect(&self, source: &SourceFile, series: &Series) -> Result<Segmentation> {
        let ranges = segment(source, series, self.threshold);
        debug!(segments = ranges.len(), samples = series.len(), "segmented series");

        Ok(Segmentation::new(
            source.clone(),
            ranges,
            self.algorithm_name().to_string(),
            series.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(values: Vec<f64>, threshold: f64) -> Segmentation {
        ThresholdSegmenter::new(threshold)
            .detect(&SourceFile::named("a.csv"), &Series::from(values))
            .unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let seg = detect(vec![0.0, 5.0, 5.0, 0.0, 3.0, 0.0, 0.0, 6.0, 6.0, 6.0], 2.0);
        assert_eq!(seg.bounds(), vec![(1, 2), (4, 4), (7, 9)]);
        let numbers: Vec<_> = seg.ranges().iter().map(|r| r.sequence_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(seg.algorithm(), "Threshold");
    }

    #[test]
    fn test_empty_series() {
        let seg = detect(vec![], 0.0);
        assert!(!seg.has_segments());
        assert_eq!(seg.sample_size(), 0);
    }

    #[test]
    fn test_all_below_threshold() {
        assert!(!detect(vec![-1.0, 0.0, 1.0, 2.0], 2.0).has_segments());
    }

    #[test]
    fn test_equal_to_threshold_is_outside() {
        let seg = detect(vec![2.0, 3.0, 2.0, 2.0, 3.0], 2.0);
        assert_eq!(seg.bounds(), vec![(1, 1), (4, 4)]);
    }

    #[test]
    fn test_whole_series_is_one_segment() {
        let seg = detect(vec![1.0; 6], 0.0);
        assert_eq!(seg.bounds(), vec![(0, 5)]);
    }

    #[test]
    fn test_nan_splits_runs() {
        let seg = detect(vec![5.0, f64::NAN, 5.0, f64::INFINITY], 0.0);
        assert_eq!(seg.bounds(), vec![(0, 0), (2, 3)]);
    }

    #[test]
    fn test_nan_threshold_finds_nothing() {
        assert!(!detect(vec![1.0, 2.0], f64::NAN).has_segments());
    }

    #[test]
    fn test_negative_threshold() {
        let seg = detect(vec![-3.0, -1.0, -0.5, -2.0], -1.5);
        assert_eq!(seg.bounds(), vec![(1, 2)]);
    }

    #[test]
    fn test_default_threshold_is_zero() {
        let seg = ThresholdSegmenter::default()
            .detect(&SourceFile::named("a.csv"), &Series::from(vec![0.0, 0.5, -1.0]))
            .unwrap();
        assert_eq!(seg.bounds(), vec![(1, 1)]);
    }

    #[test]
    fn test_source_is_attached() {
        let seg = detect(vec![1.0, 0.0, 1.0], 0.5);
        assert!(seg.ranges().iter().all(|r| r.source.file_name == "a.csv"));
    }
}
