//! Shared utilities for integration tests

use bead_core::{SegmentRange, SourceFile};
use bead_features::{FeatureRecord, FeatureTable, MetricName, MetricSet};
use std::collections::BTreeMap;

/// Record of `file` carrying the given (metric, value) pairs
pub fn record(file: &str, seq: usize, values: &[(MetricName, f64)]) -> FeatureRecord {
    let range = SegmentRange::new(SourceFile::new(format!("data/{file}"), file), seq, 0, 0);
    FeatureRecord::new(&range, values.iter().copied().collect::<BTreeMap<_, _>>())
}

/// Table over `mean` and `max` from (file, mean, max) triples, numbered per file
pub fn mean_max_table(rows: &[(&str, f64, f64)]) -> FeatureTable {
    let mut counters: BTreeMap<&str, usize> = BTreeMap::new();
    let records = rows
        .iter()
        .map(|&(file, mean, max)| {
            let seq = counters.entry(file).or_insert(0);
            *seq += 1;
            record(file, *seq, &[(MetricName::Mean, mean), (MetricName::Max, max)])
        })
        .collect();
    FeatureTable::from_records(MetricSet::parse_list("mean,max").unwrap(), records)
}
