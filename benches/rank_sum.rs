//! Rank-sum test benchmark
//!
//! The significance test runs once per bisection step, so it should stay
//! negligible next to the benchmark command itself even for large sample sets.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench rank_sum
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perfhunt::hunt::mann_whitney_u;

/// Deterministic pseudo-timings with some repeated values
fn samples(n: usize, offset: f64) -> Vec<f64> {
    (0..n)
        .map(|i| offset + ((i * 7919) % 97) as f64 * 0.001)
        .collect()
}

fn bench_mann_whitney_u(c: &mut Criterion) {
    let mut group = c.benchmark_group("mann_whitney_u");

    for n in [10, 100, 1_000, 10_000] {
        let baseline = samples(n, 0.1);
        let candidate = samples(n, 0.12);

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| mann_whitney_u(black_box(&baseline), black_box(&candidate)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mann_whitney_u);
criterion_main!(benches);
