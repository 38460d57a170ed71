//! Threshold segmentation of numeric series into beads
//!
//! A bead is a maximal contiguous run of samples strictly above a
//! threshold. The scan is a single left-to-right pass driven by an explicit
//! two-state machine ([`ScanState`]), so run starts, run ends and the
//! end-of-series close can each be tested on their own.
//!
//! ## Usage
//!
//! ```rust
//! use bead_core::{Series, SourceFile};
//! use bead_segment::{SegmentDetector, ThresholdSegmenter};
//!
//! let series = Series::from(vec![0.0, 5.0, 5.0, 0.0, 3.0, 0.0, 0.0, 6.0, 6.0, 6.0]);
//! let segmenter = ThresholdSegmenter::new(2.0);
//! let result = segmenter.detect(&SourceFile::named("run.csv"), &series).unwrap();
//!
//! assert_eq!(result.bounds(), vec![(1, 2), (4, 4), (7, 9)]);
//! ```

pub mod state;
pub mod threshold;
pub mod traits;
pub mod types;

pub use state::{exceeds, ScanState, ThresholdRuns};
pub use threshold::{segment, segment_bounds, ThresholdSegmenter};
pub use traits::{SegmentDetector, SegmentDetectorProperties};
pub use types::Segmentation;
