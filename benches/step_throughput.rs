//! Criterion benchmark: step throughput under a random legal-action policy.
//!
//! Run with: cargo bench --bench step_throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use minimetro_rl::core::{Action, GameRng, MetroConfig};
use minimetro_rl::engine::SimulationEngine;

fn config(grid_size: usize) -> MetroConfig {
    MetroConfig::default()
        .with_grid_size(grid_size)
        .with_station_spawn_rate(5)
        .with_passenger_spawn_rate(4)
        .with_max_stations(grid_size * 2)
        .with_station_capacity(50)
        .with_max_timesteps(500)
}

/// Play one episode, picking uniformly among legal actions.
fn rollout(grid_size: usize, seed: u64) -> i64 {
    let Ok(mut engine) = SimulationEngine::new(config(grid_size), seed) else {
        return 0;
    };
    let mut policy = GameRng::new(seed.wrapping_add(1));

    loop {
        let actions = engine.legal_actions();
        let action = policy.choose(&actions).copied().unwrap_or(Action::None);
        if engine.step(action).game_over {
            return engine.state().score();
        }
    }
}

fn bench_rollout(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollout");
    for grid_size in [5usize, 10, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(grid_size), &grid_size, |b, &size| {
            b.iter(|| rollout(black_box(size), 42));
        });
    }
    group.finish();
}

fn bench_idle_step(c: &mut Criterion) {
    c.bench_function("idle_step_10x10", |b| {
        let Ok(mut engine) = SimulationEngine::new(config(10), 7) else {
            return;
        };
        b.iter(|| {
            if engine.state().game_over() {
                engine.reset();
            }
            black_box(engine.step(Action::None))
        });
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let Ok(mut engine) = SimulationEngine::new(config(10), 3) else {
        return;
    };
    engine.step(Action::create_line((4, 4), (4, 5)));
    engine.step(Action::create_line((2, 2), (3, 2)));

    c.bench_function("legal_actions_10x10", |b| {
        b.iter(|| black_box(engine.legal_actions()))
    });
}

criterion_group!(benches, bench_rollout, bench_idle_step, bench_legal_actions);
criterion_main!(benches);
