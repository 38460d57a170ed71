//! Throughput of per-segment feature extraction

use bead_core::{Series, SourceFile};
use bead_features::{FeatureExtractor, MetricSet};
use bead_segment::segment;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_pulses(size: usize, period: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let on = (i / period) % 2 == 1;
            (if on { 10.0 } else { 0.0 }) + (i as f64 * 0.1).sin()
        })
        .collect()
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_extraction");
    let source = SourceFile::named("bench.csv");

    for &(size, period) in &[(10_000usize, 10usize), (100_000, 100), (1_000_000, 1000)] {
        let series = Series::from(generate_pulses(size, period));
        let ranges = segment(&source, &series, 5.0);

        for (label, metrics) in [
            ("mean_max", MetricSet::parse_list("mean,max").unwrap()),
            ("all", MetricSet::all()),
        ] {
            let extractor = FeatureExtractor::new(metrics);
            group.bench_with_input(
                BenchmarkId::new(label, format!("{size}_period_{period}")),
                &ranges,
                |b, ranges| b.iter(|| black_box(extractor.extract(&series, ranges))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
