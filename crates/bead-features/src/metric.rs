//! Metric names and metric selections

use bead_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Statistic computed over the samples of one segment
///
/// Variants are declared in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricName {
    Mean,
    Std,
    Var,
    Min,
    Max,
    Median,
    Skewness,
    Kurtosis,
}

impl MetricName {
    /// Every metric in canonical order
    pub const ALL: [MetricName; 8] = [
        MetricName::Mean,
        MetricName::Std,
        MetricName::Var,
        MetricName::Min,
        MetricName::Max,
        MetricName::Median,
        MetricName::Skewness,
        MetricName::Kurtosis,
    ];

    /// Column name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::Mean => "mean",
            MetricName::Std => "std",
            MetricName::Var => "var",
            MetricName::Min => "min",
            MetricName::Max => "max",
            MetricName::Median => "median",
            MetricName::Skewness => "skewness",
            MetricName::Kurtosis => "kurtosis",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(MetricName::Mean),
            "std" => Ok(MetricName::Std),
            "var" | "variance" => Ok(MetricName::Var),
            "min" => Ok(MetricName::Min),
            "max" => Ok(MetricName::Max),
            "median" => Ok(MetricName::Median),
            "skewness" => Ok(MetricName::Skewness),
            "kurtosis" => Ok(MetricName::Kurtosis),
            _ => Err(Error::unknown_metric(s)),
        }
    }
}

impl Serialize for MetricName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MetricName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A caller-chosen subset of metrics, iterated in canonical order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet(BTreeSet<MetricName>);

impl MetricSet {
    /// Every metric
    pub fn all() -> Self {
        Self(MetricName::ALL.into_iter().collect())
    }

    /// No metrics
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Parse a comma-separated list; `all` anywhere selects every metric
    pub fn parse_list(list: &str) -> Result<Self> {
        let mut set = BTreeSet::new();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if item.eq_ignore_ascii_case("all") {
                return Ok(Self::all());
            }
            set.insert(item.parse()?);
        }
        Ok(Self(set))
    }

    /// Add a metric
    pub fn insert(&mut self, metric: MetricName) -> bool {
        self.0.insert(metric)
    }

    /// Check membership
    pub fn contains(&self, metric: MetricName) -> bool {
        self.0.contains(&metric)
    }

    /// Metrics in canonical order
    pub fn iter(&self) -> impl Iterator<Item = MetricName> + '_ {
        self.0.iter().copied()
    }

    /// Number of selected metrics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MetricSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<MetricName> for MetricSet {
    fn from_iter<I: IntoIterator<Item = MetricName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for MetricSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_list(s)
    }
}

impl fmt::Display for MetricSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|m| m.as_str()).collect();
        f.write_str(&names.join(","))
    }
}
