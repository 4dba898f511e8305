//! Flock tick benchmarks. Every agent considers every other agent, so a tick
//! is O(N^2).
//!
//! Run: `cargo bench --bench tick`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use boids3d::{Boundary, FlockConfig, SphereObstacle, Vector3};

fn config() -> FlockConfig {
    FlockConfig {
        boundary: Some(Boundary::default()),
        obstacles: vec![
            SphereObstacle::new(Vector3::new(50.0, 50.0, 50.0), 5.0, 5.0, 20.0)
                .expect("valid obstacle"),
        ],
        ..FlockConfig::default()
    }
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_tick");

    for count in [16usize, 128, 512] {
        let flock = config().build(count, 42).expect("valid config");
        group.bench_with_input(BenchmarkId::from_parameter(count), &flock, |b, flock| {
            b.iter_batched(
                || flock.clone(),
                |mut flock| black_box(flock.tick()),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_velocity_phase(c: &mut Criterion) {
    let mut flock = config().build(256, 7).expect("valid config");

    c.bench_function("velocity_phase_256", |b| {
        b.iter(|| black_box(flock.velocity_phase()))
    });
}

criterion_group!(benches, bench_tick, bench_velocity_phase);
criterion_main!(benches);
