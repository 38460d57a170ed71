//! File selection for reports

use bead_features::FeatureTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which files' rows enter a report
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSelection {
    /// Every file in the table
    #[default]
    All,
    /// Only the named files, matched on `file_name`
    Named(BTreeSet<String>),
}

impl FileSelection {
    /// Selection from an optional list of names; `None` selects everything
    pub fn from_names<I, S>(names: Option<I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match names {
            None => FileSelection::All,
            Some(names) => FileSelection::Named(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Check if rows of `file_name` are selected
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            FileSelection::All => true,
            FileSelection::Named(names) => names.contains(file_name),
        }
    }

    /// Rows of `table` from selected files
    pub fn apply(&self, table: &FeatureTable) -> FeatureTable {
        table.filter_files(|name| self.matches(name))
    }
}
