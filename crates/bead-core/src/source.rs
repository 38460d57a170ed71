//! Boundary abstraction over the files of a batch
//!
//! A `TableSource` maps file identities to row-labeled numeric columns. The
//! segmentation and extraction stages read a fresh column through it every
//! time they run, so a source whose data changes between stages is observed
//! as-is.

use crate::error::{Error, Result};
use crate::types::{Series, SourceFile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a column of a tabular file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Column addressed by its header
    Named(String),
    /// Column addressed by its 0-based position
    Position(usize),
}

impl ColumnRef {
    /// The first column of a file
    pub const FIRST: ColumnRef = ColumnRef::Position(0);

    /// Resolve against a header row, returning the column position
    pub fn resolve(&self, headers: &[String]) -> Result<usize> {
        match self {
            ColumnRef::Named(name) => headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MissingColumn(name.clone())),
            ColumnRef::Position(pos) if *pos < headers.len() => Ok(*pos),
            ColumnRef::Position(pos) => Err(Error::MissingColumn(format!(
                "position {pos} of {} columns",
                headers.len()
            ))),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Named(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Named(name)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Named(name) => write!(f, "column '{name}'"),
            ColumnRef::Position(pos) => write!(f, "column #{pos}"),
        }
    }
}

/// Supplier of the files of a batch and their numeric columns
pub trait TableSource: Sync {
    /// Files of the batch, in presentation order
    fn files(&self) -> Vec<SourceFile>;

    /// Header row of a file
    fn headers(&self, file: &SourceFile) -> Result<Vec<String>>;

    /// Read one column of a file as a numeric series
    fn load_column(&self, file: &SourceFile, column: &ColumnRef) -> Result<Series>;
}

/// A source holding every table in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: Vec<(SourceFile, Vec<(String, Vec<f64>)>)>,
}

impl InMemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with its named columns, replacing any file with the same identity
    pub fn with_file(mut self, file: SourceFile, columns: Vec<(String, Vec<f64>)>) -> Self {
        self.insert(file, columns);
        self
    }

    /// Insert or replace a file
    pub fn insert(&mut self, file: SourceFile, columns: Vec<(String, Vec<f64>)>) {
        match self.tables.iter_mut().find(|(f, _)| *f == file) {
            Some(slot) => slot.1 = columns,
            None => self.tables.push((file, columns)),
        }
    }

    fn table(&self, file: &SourceFile) -> Result<&[(String, Vec<f64>)]> {
        self.tables
            .iter()
            .find(|(f, _)| f == file)
            .map(|(_, columns)| columns.as_slice())
            .ok_or_else(|| Error::InvalidInput(format!("Unknown file {file}")))
    }
}

impl TableSource for InMemorySource {
    fn files(&self) -> Vec<SourceFile> {
        self.tables.iter().map(|(f, _)| f.clone()).collect()
    }

    fn headers(&self, file: &SourceFile) -> Result<Vec<String>> {
        Ok(self.table(file)?.iter().map(|(name, _)| name.clone()).collect())
    }

    fn load_column(&self, file: &SourceFile, column: &ColumnRef) -> Result<Series> {
        let table = self.table(file)?;
        let headers: Vec<String> = table.iter().map(|(name, _)| name.clone()).collect();
        let pos = column.resolve(&headers)?;
        Ok(Series::new(table[pos].1.clone()))
    }
}
