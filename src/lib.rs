//! # bead-stats
//!
//! Segmentation of recorded traces into beads and per-bead feature reports.
//!
//! A bead is a maximal run of samples whose filter-column value lies
//! strictly above a threshold. For every bead the selected statistics of a
//! value column are computed, and the resulting table can be averaged per
//! file and summarized as a metric correlation matrix.
//!
//! ## Crates
//!
//! - [`bead_core`]: shared types, errors, the table-source boundary, events
//!   and execution engines
//! - [`bead_segment`]: threshold run-length segmentation
//! - [`bead_features`]: per-segment statistics with selectable metrics
//! - [`bead_report`]: per-file aggregation and Pearson correlation
//! - [`bead_polars`]: CSV input and output through Polars
//!
//! ## Example
//!
//! ```rust
//! use bead_stats::prelude::*;
//!
//! let source = InMemorySource::new().with_file(
//!     SourceFile::named("run_01.csv"),
//!     vec![(
//!         "Current".to_string(),
//!         vec![0.0, 5.0, 5.0, 0.0, 3.0, 0.0, 0.0, 6.0, 6.0, 6.0],
//!     )],
//! );
//!
//! let mut config = BeadConfig::new("Current");
//! config.filter_threshold = 2.0;
//! config.selected_features = "mean,max".parse().unwrap();
//!
//! let mut session = BeadSession::new(source, config).unwrap();
//! let table = session.run().unwrap();
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.column(MetricName::Mean), vec![5.0, 3.0, 6.0]);
//! ```

pub mod config;
pub mod session;

pub use config::{BeadConfig, FailurePolicy};
pub use session::{BeadSession, SessionSummary, SkippedFile};

// Re-export workspace crates
pub use bead_core;
pub use bead_features;
pub use bead_polars;
pub use bead_report;
pub use bead_segment;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{BeadConfig, BeadSession, FailurePolicy, SessionSummary, SkippedFile};
    pub use bead_core::prelude::*;
    pub use bead_core::InMemorySource;
    pub use bead_features::{FeatureRecord, FeatureTable, MetricName, MetricSet};
    pub use bead_polars::CsvDirectorySource;
    pub use bead_report::{AggregatedTable, CorrelationMatrix, FileSelection, GroupMeanExt};
    pub use bead_segment::{SegmentDetector, Segmentation, ThresholdSegmenter};
}
