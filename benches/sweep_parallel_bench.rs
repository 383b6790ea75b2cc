//! Compare sequential vs parallel sweep run times.
//!
//! Run with: `cargo bench --bench sweep_parallel`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tryout::parallel::{run_sweep_batches, Parallelism};
use tryout::sweep::{run_sweep, run_sweep_parallel, SweepScenario};

fn bench_scenario() -> SweepScenario {
    SweepScenario {
        applicants: 50,
        seats: 10,
        repetitions: 200,
        seed: 42,
        quota_fractions: vec![0.5, 0.7, 0.9, 1.0],
        bias_factors: vec![0.01, 0.33, 0.67, 1.0],
    }
}

fn bench_sweep_sequential_vs_parallel(c: &mut Criterion) {
    let scenario = bench_scenario();

    let mut group = c.benchmark_group("sweep");
    group.sample_size(20);
    group.measurement_time(std::time::Duration::from_secs(10));

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(run_sweep(&scenario)).expect("sweep should run"));
    });

    group.bench_function("parallel", |b| {
        b.iter(|| black_box(run_sweep_parallel(&scenario)).expect("sweep should run"));
    });

    group.bench_function("parallel_2_workers", |b| {
        b.iter(|| {
            black_box(run_sweep_batches(&scenario, &Parallelism::Fixed(2)))
                .expect("sweep should run")
        });
    });

    group.finish();
}

criterion_group!(benches, bench_sweep_sequential_vs_parallel);
criterion_main!(benches);
