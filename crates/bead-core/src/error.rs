//! Error types for bead segmentation and feature extraction
//!
//! Provides a unified error type for all bead-stats crates.

use thiserror::Error;

/// Core error type for segmentation and extraction
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or non-numeric series, or an inverted index range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Segment index inconsistent with the current series length
    #[error("Index out of range: index {index} is beyond a series of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A selection matched nothing to report on
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// Invalid parameter or configuration value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested column is not present in a source
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a stale or otherwise out-of-bounds range end
    pub fn stale_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Create an error for a range whose start lies after its end
    pub fn inverted_range(start: usize, end: usize) -> Self {
        Self::InvalidInput(format!(
            "Segment start {start} lies after segment end {end}"
        ))
    }

    /// Create an error for an entry that could not be read as a number
    pub fn non_numeric(context: &str, position: usize) -> Self {
        Self::InvalidInput(format!(
            "{context} has a missing or non-numeric value at row {position}"
        ))
    }

    /// Create an error for an unrecognised metric name
    pub fn unknown_metric(name: &str) -> Self {
        Self::InvalidParameter(format!("Unknown metric '{name}'"))
    }
}
