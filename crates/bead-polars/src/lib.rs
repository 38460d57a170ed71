//! Polars integration for bead segmentation
//!
//! This crate is the CSV boundary of the workspace: [`CsvDirectorySource`]
//! serves a directory of CSV files as a [`bead_core::TableSource`], the
//! [`BeadStatsExt`] extension trait runs segmentation and extraction
//! directly on a `DataFrame`, and the `export` functions turn feature
//! tables and correlation matrices back into frames and CSV files.
//!
//! # Example
//!
//! ```rust,ignore
//! use polars::prelude::*;
//! use bead_core::{ColumnRef, SourceFile};
//! use bead_features::MetricSet;
//! use bead_polars::BeadStatsExt;
//!
//! let df = df!["Current" => [0.0, 5.0, 5.0, 0.0, 3.0]]?;
//!
//! let features = df
//!     .bead_features(
//!         &SourceFile::named("run.csv"),
//!         &"Current".into(),
//!         &ColumnRef::FIRST,
//!         2.0,
//!         &MetricSet::all(),
//!     )
//!     .unwrap();
//! ```

mod error;
pub mod export;
pub mod reader;
mod source;
mod traits;

pub use error::{Error, Result};
pub use export::{
    aggregated_table_to_dataframe, correlation_to_dataframe, feature_table_to_dataframe,
    write_csv,
};
pub use reader::read_csv;
pub use source::CsvDirectorySource;
pub use traits::BeadStatsExt;
