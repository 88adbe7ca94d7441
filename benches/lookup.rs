//! Lookup and churn benchmarks across the strategy registry.
//!
//! Measures per-call `get` cost at several bucket counts and the cost of one
//! add/remove churn cycle, per strategy. Uses the registry constructors so
//! the set benched is exactly the set the report binary runs.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hashbench::registry::STANDARD_STRATEGIES;
use hashbench::traits::BucketRouter;

const OPS: u64 = 10_000;

fn keys() -> Vec<String> {
    (0..OPS).map(|i| format!("{:x}", i.wrapping_mul(0x9e37_79b9_7f4a_7c15))).collect()
}

fn populated(id: &str, n: usize) -> Box<dyn BucketRouter> {
    let case = STANDARD_STRATEGIES
        .iter()
        .find(|c| c.id == id)
        .unwrap_or_else(|| panic!("unknown strategy {id}"));
    let mut router = (case.make)();
    for i in 0..n {
        router.add(&format!("192.168.0.{i}"));
    }
    router
}

// =============================================================================
// Get benchmarks
// =============================================================================

fn bench_get(c: &mut Criterion) {
    let keys = keys();

    for &n in &[10usize, 100, 1000] {
        let mut group = c.benchmark_group(format!("get_{n}_buckets"));
        group.throughput(Throughput::Elements(OPS));

        for case in STANDARD_STRATEGIES {
            let router = populated(case.id, n);
            group.bench_function(BenchmarkId::from_parameter(case.id), |b| {
                b.iter(|| {
                    for key in &keys {
                        black_box(router.get(key));
                    }
                })
            });
        }
        group.finish();
    }
}

// =============================================================================
// Churn benchmarks
// =============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn_add_remove");

    for case in STANDARD_STRATEGIES {
        group.bench_function(BenchmarkId::from_parameter(case.id), |b| {
            b.iter_batched(
                || populated(case.id, 100),
                |mut router| {
                    router.add("10.0.0.1");
                    router.remove("10.0.0.1");
                    router
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_get, bench_churn);
criterion_main!(benches);
