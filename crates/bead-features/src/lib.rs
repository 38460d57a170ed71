//! Per-segment descriptive statistics
//!
//! Given a value series and the ranges produced by segmentation, this crate
//! computes one [`FeatureRecord`] per range holding exactly the requested
//! metrics. Metrics are looked up in a [`MetricRegistry`] that maps each
//! [`MetricName`] to a pure evaluator over the segment's population moments.
//!
//! # Metrics
//!
//! | name       | definition                                   |
//! |------------|----------------------------------------------|
//! | `mean`     | arithmetic mean                              |
//! | `std`      | population standard deviation (divisor n)    |
//! | `var`      | population variance (divisor n)              |
//! | `min`      | smallest sample                              |
//! | `max`      | largest sample                               |
//! | `median`   | middle sample, mean of the two for even n    |
//! | `skewness` | `m3 / m2^1.5`, no bias correction            |
//! | `kurtosis` | `m4 / m2^2 - 3`, no bias correction          |
//!
//! Skewness and kurtosis of a zero-variance segment are `NaN`.
//!
//! # Example
//!
//! ```rust
//! use bead_core::{SegmentRange, Series, SourceFile};
//! use bead_features::{extract, MetricName, MetricSet};
//!
//! let series = Series::from(vec![0.0, 5.0, 5.0, 0.0, 3.0, 0.0, 0.0, 6.0, 6.0, 6.0]);
//! let range = SegmentRange::new(SourceFile::named("run.csv"), 3, 7, 9);
//! let metrics: MetricSet = "mean,max".parse().unwrap();
//!
//! let records = extract(&series, &[range], &metrics).unwrap();
//! assert_eq!(records[0].get(MetricName::Mean), Some(6.0));
//! ```

pub mod extractor;
pub mod metric;
pub mod moments;
pub mod registry;
pub mod table;

pub use extractor::{extract, FeatureExtractor};
pub use metric::{MetricName, MetricSet};
pub use moments::SegmentSample;
pub use registry::{Evaluator, MetricRegistry};
pub use table::{FeatureRecord, FeatureTable};
