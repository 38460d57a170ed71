//! Throughput of the threshold scan

use bead_core::{Series, SourceFile};
use bead_segment::{segment_bounds, SegmentDetector, ThresholdSegmenter};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Square-ish pulses with a sinusoidal ripple
fn generate_pulses(size: usize, period: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let on = (i / period) % 2 == 1;
            (if on { 10.0 } else { 0.0 }) + (i as f64 * 0.1).sin()
        })
        .collect()
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold_segmentation");

    for &size in &[1_000usize, 100_000, 1_000_000] {
        for &period in &[5usize, 500] {
            let data = generate_pulses(size, period);
            group.bench_with_input(
                BenchmarkId::new("bounds", format!("{size}_period_{period}")),
                &data,
                |b, data| b.iter(|| black_box(segment_bounds(data, 5.0))),
            );

            let series = Series::from(data);
            let source = SourceFile::named("bench.csv");
            let segmenter = ThresholdSegmenter::new(5.0);
            group.bench_with_input(
                BenchmarkId::new("detector", format!("{size}_period_{period}")),
                &series,
                |b, series| b.iter(|| black_box(segmenter.detect(&source, series))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_segmentation);
criterion_main!(benches);
