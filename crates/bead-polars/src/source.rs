//! A `TableSource` over a directory of CSV files

use crate::reader::{header_names, numeric_series, read_csv};
use crate::{Error, Result};
use bead_core::{ColumnRef, Series, SourceFile, TableSource};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// CSV files of a batch, read from disk on every access
///
/// Each stage reads a fresh copy of the column it needs, so edits made to a
/// file between segmentation and extraction are seen by extraction.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    paths: Vec<PathBuf>,
}

impl CsvDirectorySource {
    /// Every `*.csv` file directly inside `dir`, sorted by path
    #[instrument(level = "debug", skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.is_file() && is_csv(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        debug!(files = paths.len(), "found csv files");
        Ok(Self { paths })
    }

    /// An explicit list of files, kept in the given order
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Paths of the batch
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn path_of(&self, file: &SourceFile) -> Result<&Path> {
        self.paths
            .iter()
            .find(|p| SourceFile::from_path(p) == *file)
            .map(PathBuf::as_path)
            .ok_or_else(|| Error::UnknownFile(file.to_string()))
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

impl TableSource for CsvDirectorySource {
    fn files(&self) -> Vec<SourceFile> {
        self.paths.iter().map(|p| SourceFile::from_path(p)).collect()
    }

    fn headers(&self, file: &SourceFile) -> bead_core::Result<Vec<String>> {
        let df = read_csv(self.path_of(file)?)?;
        Ok(header_names(&df))
    }

    fn load_column(&self, file: &SourceFile, column: &ColumnRef) -> bead_core::Result<Series> {
        let df = read_csv(self.path_of(file)?)?;
        Ok(numeric_series(&df, column, &file.file_name)?)
    }
}
