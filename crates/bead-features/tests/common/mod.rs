//! Shared utilities for integration tests

use bead_core::{SegmentRange, Series, SourceFile};

pub use approx::assert_relative_eq;

/// The trace used throughout the scenario tests
pub fn reference_series() -> Series {
    Series::from(vec![0.0, 5.0, 5.0, 0.0, 3.0, 0.0, 0.0, 6.0, 6.0, 6.0])
}

/// Range over `a.csv`
pub fn range(seq: usize, start: usize, end: usize) -> SegmentRange {
    SegmentRange::new(SourceFile::named("a.csv"), seq, start, end)
}
