//! Core types and plumbing for bead segmentation
//!
//! This crate holds what the segmentation, extraction and reporting crates
//! share: the data records that flow between them, the error taxonomy, the
//! `TableSource` boundary over input files, the event bus used for progress
//! reporting, and the execution engines that fan per-file work out.
//!
//! # Example
//!
//! ```rust
//! use bead_core::{InMemorySource, SourceFile, TableSource};
//!
//! let source = InMemorySource::new().with_file(
//!     SourceFile::named("run_01.csv"),
//!     vec![("Current".to_string(), vec![0.0, 5.0, 5.0, 0.0])],
//! );
//!
//! let file = &source.files()[0];
//! let series = source.load_column(file, &"Current".into()).unwrap();
//! assert_eq!(series.len(), 4);
//! ```

pub mod error;
pub mod execution;
pub mod pipeline;
pub mod source;
pub mod types;

// Re-export core types
pub use error::{Error, Result};

pub use execution::{engine_for, AutoEngine, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::ParallelEngine;

pub use pipeline::{EventBus, EventHandler, PipelineContext, PipelineEvent};
pub use source::{ColumnRef, InMemorySource, TableSource};
pub use types::{SegmentRange, Series, SourceFile};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{
        ColumnRef, EventBus, ExecutionEngine, ExecutionStrategy, PipelineContext, PipelineEvent,
        Result, SegmentRange, Series, SourceFile, TableSource,
    };
}
