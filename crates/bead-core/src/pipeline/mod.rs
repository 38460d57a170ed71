//! Pipeline infrastructure shared by the segmentation and extraction stages
//!
//! Provides the run context and the event bus that progress observers
//! subscribe to.

pub mod context;
pub mod events;

// Re-export commonly used types
pub use context::PipelineContext;
pub use events::{
    EventBus, EventHandler, LoggingHandler, MetricsHandler, NullEventHandler, PipelineEvent,
    PipelineMetrics, EXTRACTION_STAGE, SEGMENTATION_STAGE,
};
