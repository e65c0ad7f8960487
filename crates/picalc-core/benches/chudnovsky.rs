//! Criterion benchmarks for the split/merge pipeline and full runs.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use picalc_core::executor::SplitExecutor;
use picalc_core::observers::NoOpObserver;
use picalc_core::options::{available_workers, Options};
use picalc_core::partition::partition;
use picalc_core::reducer::reduce;
use picalc_core::{compute_pi_with, split};

fn bench_split(c: &mut Criterion) {
    let terms: Vec<u64> = vec![100, 1_000, 10_000];
    let executor = SplitExecutor::new(available_workers()).unwrap();
    let observer = NoOpObserver::new();

    let mut group = c.benchmark_group("MonolithicSplit");
    for &n in &terms {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| split(1, n + 1));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("ParallelSplitMerge");
    for &n in &terms {
        let chunks = partition(1, n + 1, executor.workers(), 2, None);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let results = executor.split_chunks(&chunks, &observer, 1).unwrap();
                executor.install(|| reduce(results, &observer, 1)).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_digits(c: &mut Criterion) {
    let opts = Options::default();
    let observer = NoOpObserver::new();

    let mut group = c.benchmark_group("ComputePi");
    for &digits in &[1_000u64, 10_000, 50_000] {
        group.bench_with_input(BenchmarkId::from_parameter(digits), &digits, |b, &d| {
            b.iter(|| compute_pi_with(d, &opts, &observer).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_split, bench_digits);
criterion_main!(benches);
