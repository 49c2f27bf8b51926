//! Frame-time benchmarks for the session engine.
//!
//! Run with: cargo bench --package survival-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use survival_core::prelude::*;
use survival_logic::config::SessionConfig;

/// A generated world scaled up by `factor` in every scatter count.
fn create_engine(factor: u32) -> SimulationEngine {
    let mut config = SessionConfig::default();
    config.world.tree_count *= factor;
    config.world.rock_count *= factor;
    config.world.bush_count *= factor;
    config.objectives.losing_time = f32::MAX;

    let mut engine = SimulationEngine::new(config);
    engine.generate().expect("default archetypes are valid");
    engine
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");

    for factor in [1, 10, 100].iter() {
        let mut engine = create_engine(*factor);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x_world", factor)),
            factor,
            |b, _| {
                b.iter(|| {
                    engine.update(black_box(1.0 / 60.0));
                    black_box(engine.drain_events())
                });
            },
        );
    }

    group.finish();
}

fn bench_targeting(c: &mut Criterion) {
    let mut group = c.benchmark_group("interact");

    for factor in [1, 10, 100].iter() {
        let mut engine = create_engine(*factor);
        // Face away from everything so each call walks every collider and misses
        engine.set_player_transform(Transform::new(Vec3::new(0.0, 0.0, 10_000.0), 0.0));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x_world", factor)),
            factor,
            |b, _| {
                b.iter(|| black_box(engine.interact()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_update, bench_targeting);
criterion_main!(benches);
