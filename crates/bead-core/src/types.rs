//! Core data types shared by the segmentation and extraction stages
//!
//! These are the fundamental records that flow between the segmenter,
//! the feature extractor and the reporter.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;

/// An immutable, 0-indexed sequence of samples read from one column of one file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    /// Wrap already-numeric values
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Build a series from coerced cells, rejecting missing entries
    ///
    /// `context` names the column in the error message; a `None` cell is
    /// what the boundary layer produces for text that is not a number.
    /// Empty cells arrive as NaN and are kept.
    pub fn from_cells<I>(context: &str, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values = cells
            .into_iter()
            .enumerate()
            .map(|(row, cell)| cell.ok_or_else(|| Error::non_numeric(context, row)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { values })
    }

    /// Samples as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the series has no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the inclusive slice `[start, end]`
    ///
    /// Fails with `OutOfRange` if `end` does not index into this series, and
    /// with `InvalidInput` if the range is inverted.
    pub fn slice_inclusive(&self, start: usize, end: usize) -> Result<&[f64]> {
        if end >= self.values.len() {
            return Err(Error::stale_range(end, self.values.len()));
        }
        if start > end {
            return Err(Error::inverted_range(start, end));
        }
        Ok(&self.values[start..=end])
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Identity of one input file in a batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceFile {
    /// The path as supplied by the source
    pub file_dir: String,
    /// Final path component
    pub file_name: String,
}

impl SourceFile {
    /// Create a source identity from explicit parts
    pub fn new(file_dir: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            file_dir: file_dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Derive the identity from a file path
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_dir: path.to_string_lossy().into_owned(),
            file_name,
        }
    }

    /// Identity with the same value for both parts, handy for in-memory data
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            file_dir: name.clone(),
            file_name: name,
        }
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_dir)
    }
}

/// A contiguous, inclusive run of indices where the threshold condition held
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentRange {
    /// File the range indexes into
    pub source: SourceFile,
    /// 1-based position in discovery order within the file
    pub sequence_number: usize,
    /// First index of the run (inclusive)
    pub start_index: usize,
    /// Last index of the run (inclusive)
    pub end_index: usize,
}

impl SegmentRange {
    /// Create a new range
    pub fn new(
        source: SourceFile,
        sequence_number: usize,
        start_index: usize,
        end_index: usize,
    ) -> Self {
        Self {
            source,
            sequence_number,
            start_index,
            end_index,
        }
    }

    /// Number of samples covered, zero for an inverted range
    pub fn len(&self) -> usize {
        self.end_index
            .checked_sub(self.start_index)
            .map_or(0, |span| span + 1)
    }

    /// Whether the range is inverted and covers nothing
    pub fn is_empty(&self) -> bool {
        self.start_index > self.end_index
    }

    /// `(start, end)` pair
    pub fn bounds(&self) -> (usize, usize) {
        (self.start_index, self.end_index)
    }

    /// Convert to a standard inclusive range
    pub fn as_range(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// Check whether an index lies inside the range
    pub fn contains(&self, index: usize) -> bool {
        self.as_range().contains(&index)
    }
}

impl fmt::Display for SegmentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bead {} of {} [{}, {}]",
            self.sequence_number, self.source.file_name, self.start_index, self.end_index
        )
    }
}
