//! Bead segmentation and feature extraction over a directory of CSV files
//!
//! **Usage:**
//! ```bash
//! bead-stats --input <dir> --filter-column Current --threshold 2.0 \
//!     [--features mean,max] [--aggregate] [--select a.csv b.csv] \
//!     [--output features.csv] [--correlation-output corr.csv]
//! ```

use anyhow::{Context, Result};
use bead_core::pipeline::{LoggingHandler, MetricsHandler};
use bead_core::ExecutionStrategy;
use bead_features::MetricSet;
use bead_polars::{
    aggregated_table_to_dataframe, correlation_to_dataframe, feature_table_to_dataframe,
    write_csv, CsvDirectorySource,
};
use bead_stats::{BeadConfig, BeadSession, FailurePolicy};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Segment CSV traces into beads and report per-bead features
#[derive(Parser, Debug)]
#[clap(name = "bead-stats")]
#[clap(about = "Segment CSV traces into beads and extract per-bead features")]
struct Args {
    /// Directory containing the CSV files of the batch
    #[clap(long, value_name = "DIR")]
    input: PathBuf,

    /// JSON configuration file; flags below override its values
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Column thresholded to find beads (default: first column)
    #[clap(long)]
    filter_column: Option<String>,

    /// Column summarized per bead (default: first column)
    #[clap(long)]
    value_column: Option<String>,

    /// Samples strictly above this value belong to a bead
    #[clap(long, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Comma-separated metrics, or `all`
    #[clap(long, value_name = "LIST")]
    features: Option<String>,

    /// Average beads per file before correlating
    #[clap(long)]
    aggregate: bool,

    /// File names entering the correlation (default: all)
    #[clap(long, value_name = "FILE_NAME", num_args = 1..)]
    select: Vec<String>,

    /// Write the feature table to this CSV file
    #[clap(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the correlation matrix to this CSV file
    #[clap(long, value_name = "FILE")]
    correlation_output: Option<PathBuf>,

    /// Leave out files that fail instead of aborting
    #[clap(long)]
    skip_bad_files: bool,

    /// Process files one at a time
    #[clap(long)]
    sequential: bool,
}

impl Args {
    fn into_config(self) -> Result<(BeadConfig, Outputs)> {
        let mut config = match &self.config {
            Some(path) => BeadConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => BeadConfig::default(),
        };

        if let Some(column) = self.filter_column {
            config.filter_column = column;
        }
        if let Some(column) = self.value_column {
            config.value_column = Some(column);
        }
        if let Some(threshold) = self.threshold {
            config.filter_threshold = threshold;
        }
        if let Some(list) = &self.features {
            config.selected_features = MetricSet::parse_list(list)
                .with_context(|| format!("Invalid --features '{list}'"))?;
        }
        if self.aggregate {
            config.aggregation = true;
        }
        if !self.select.is_empty() {
            config.correlation_files = Some(self.select);
        }
        if self.skip_bad_files {
            config.failure_policy = FailurePolicy::SkipFile;
        }
        if self.sequential {
            config.execution = ExecutionStrategy::Sequential;
        }

        Ok((
            config,
            Outputs {
                input: self.input,
                features: self.output,
                correlation: self.correlation_output,
            },
        ))
    }
}

struct Outputs {
    input: PathBuf,
    features: Option<PathBuf>,
    correlation: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (config, outputs) = Args::parse().into_config()?;

    let source = CsvDirectorySource::open(&outputs.input)
        .with_context(|| format!("Failed to list CSV files in {}", outputs.input.display()))?;
    info!(files = source.paths().len(), input = %outputs.input.display(), "loaded batch");

    let mut session = BeadSession::new(source, config)?;
    let metrics = MetricsHandler::new();
    session.events().register(LoggingHandler::new(log::Level::Debug))?;
    session.events().register(metrics.clone())?;

    session.segment().context("Segmentation failed")?;
    let table = session.extract().context("Feature extraction failed")?;

    let mut features = feature_table_to_dataframe(table)?;
    match &outputs.features {
        Some(path) => write_csv(&mut features, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{features}"),
    }

    if session.config().aggregation {
        let aggregated = session.aggregated()?;
        println!("{}", aggregated_table_to_dataframe(&aggregated)?);
    }

    match session.correlation() {
        Ok(matrix) => {
            println!("{matrix}");
            if let Some(path) = &outputs.correlation {
                let mut df = correlation_to_dataframe(&matrix)?;
                write_csv(&mut df, path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        Err(bead_core::Error::EmptySelection(reason)) if outputs.correlation.is_none() => {
            warn!(%reason, "skipping correlation");
        }
        Err(err) => return Err(err).context("Correlation failed"),
    }

    print!("{}", session.summary());
    let counters = metrics.snapshot()?;
    info!(
        segments = counters.total_segments,
        files_extracted = counters.files_extracted,
        skipped = counters.skipped_files,
        "done"
    );
    Ok(())
}
