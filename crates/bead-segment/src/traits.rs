//! Core traits for bead segmentation
//!
//! Detectors are pure functions of a series and their parameters: the same
//! input always yields the same ordered ranges, so files can be segmented
//! on any thread in any order.

use crate::types::Segmentation;
use bead_core::{Result, Series, SourceFile};

/// Properties of a detector that don't depend on its input
pub trait SegmentDetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;
}

/// Segment one series into ordered, non-overlapping ranges
pub trait SegmentDetector: SegmentDetectorProperties + Sync {
    /// Detect segments in `series`, numbering them 1.. for `source`
    fn detect(&self, source: &SourceFile, series: &Series) -> Result<Segmentation>;
}
