//! Segmentation and extraction on DataFrames, and CSV export

mod common;

use bead_core::{ColumnRef, SourceFile};
use bead_features::MetricSet;
use bead_polars::{feature_table_to_dataframe, read_csv, write_csv, BeadStatsExt};
use common::*;
use polars::prelude::*;
use tempfile::TempDir;

fn reference_frame() -> DataFrame {
    frame(&[
        ("Value", (0..10).map(|i| i as f64).collect()),
        ("Current", vec![0.0, 5.0, 5.0, 0.0, 3.0, 0.0, 0.0, 6.0, 6.0, 6.0]),
    ])
}

#[test]
fn test_segment_beads() {
    let df = reference_frame()
        .segment_beads(&SourceFile::named("run.csv"), &"Current".into(), 2.0)
        .unwrap();
    assert_eq!(df.height(), 3);
    let starts: Vec<Option<u64>> = df.column("start_index").unwrap().u64().unwrap().into_iter().collect();
    let ends: Vec<Option<u64>> = df.column("end_index").unwrap().u64().unwrap().into_iter().collect();
    assert_eq!(starts, vec![Some(1), Some(4), Some(7)]);
    assert_eq!(ends, vec![Some(2), Some(4), Some(9)]);
}

#[test]
fn test_segment_beads_none_above() {
    let df = reference_frame()
        .segment_beads(&SourceFile::named("run.csv"), &"Current".into(), 100.0)
        .unwrap();
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 4);
}

#[test]
fn test_bead_features_on_first_column() {
    let df = reference_frame()
        .bead_features(
            &SourceFile::named("run.csv"),
            &"Current".into(),
            &ColumnRef::FIRST,
            2.0,
            &MetricSet::parse_list("mean,max").unwrap(),
        )
        .unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(float_cell(&df, "mean", 0), Some(1.5));
    assert_eq!(float_cell(&df, "max", 2), Some(9.0));
}

#[test]
fn test_bead_features_missing_column() {
    let result = reference_frame().bead_features(
        &SourceFile::named("run.csv"),
        &"Voltage".into(),
        &ColumnRef::FIRST,
        2.0,
        &MetricSet::all(),
    );
    assert!(result.is_err());
}

#[test]
fn test_write_and_read_back() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut features = reference_frame().bead_features(
        &SourceFile::named("run.csv"),
        &"Current".into(),
        &"Current".into(),
        2.0,
        &MetricSet::parse_list("mean,min").unwrap(),
    )?;
    let path = dir.path().join("features.csv");
    write_csv(&mut features, &path)?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.starts_with("file_dir,file_name,bead_number,mean,min\n"));

    let back = read_csv(&path)?;
    assert_eq!(back.height(), 3);
    assert_eq!(float_cell(&back, "mean", 2), Some(6.0));
    Ok(())
}

#[test]
fn test_empty_table_exports_header_only() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut df = feature_table_to_dataframe(&bead_features::FeatureTable::new(
        MetricSet::parse_list("std").unwrap(),
    ))?;
    let path = dir.path().join("empty.csv");
    write_csv(&mut df, &path)?;
    let text = std::fs::read_to_string(&path)?;
    assert_eq!(text.trim_end(), "file_dir,file_name,bead_number,std");
    Ok(())
}
