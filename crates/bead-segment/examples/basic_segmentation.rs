//! Basic bead segmentation example

use bead_core::{Series, SourceFile};
use bead_segment::{SegmentDetector, ThresholdSegmenter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Bead Segmentation Examples ===\n");

    // Example 1: the reference trace
    println!("1. Short trace, threshold 2.0");
    let series = Series::from(vec![0.0, 5.0, 5.0, 0.0, 3.0, 0.0, 0.0, 6.0, 6.0, 6.0]);
    let result = ThresholdSegmenter::new(2.0).detect(&SourceFile::named("trace.csv"), &series)?;
    print!("{result}");

    // Example 2: a pulsed welding current with noise around the baseline
    println!("\n2. Pulsed signal, threshold 50.0");
    let pulsed: Vec<f64> = (0..400)
        .map(|i| {
            let on = (i / 50) % 2 == 1;
            let base = if on { 120.0 } else { 5.0 };
            base + ((i as f64) * 0.7).sin() * 3.0
        })
        .collect();
    let result = ThresholdSegmenter::new(50.0)
        .detect(&SourceFile::named("pulsed.csv"), &Series::from(pulsed))?;
    println!("  Found {} beads covering {} samples", result.count(), result.covered_samples());
    if let Some(longest) = result.longest() {
        println!("  Longest: {longest}");
    }

    Ok(())
}
