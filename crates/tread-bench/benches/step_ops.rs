//! Criterion micro-benchmarks for simulator stepping.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use tread_bench::{reference_mdp, ACTIONS};
use tread_core::{Action, ActionMode, Model, ObservationMode, SteppingEngine};
use tread_sim::{create_simulator, create_simulator_with, Simulator, SimulatorConfig};
use tread_sparse::SparseEngine;

const CELLS: usize = 1_000;
const EPISODE: usize = 1_000;

/// Benchmark: raw engine random steps, restarting at the goal.
fn bench_engine_random_step(c: &mut Criterion) {
    let model = reference_mdp(CELLS, 42).unwrap();
    let mut engine = SparseEngine::with_seed(&model, 7);

    c.bench_function("engine_random_step_1k", |b| {
        b.iter(|| {
            for _ in 0..EPISODE {
                if model.is_sink_state(engine.current_state()) {
                    engine.reset_to_initial_state();
                }
                black_box(engine.random_step());
            }
        });
    });
}

/// Benchmark: indexed steps through the simulator.
fn bench_indexed_step(c: &mut Criterion) {
    let model = reference_mdp(CELLS, 42).unwrap();
    let mut sim = create_simulator(&model, Some(7)).unwrap();

    c.bench_function("sim_indexed_step_1k", |b| {
        b.iter(|| {
            sim.restart().unwrap();
            for i in 0..EPISODE {
                if sim.is_done() {
                    sim.restart().unwrap();
                }
                let r = sim.step(Some(Action::Index(i % ACTIONS.len()))).unwrap();
                black_box(r);
            }
        });
    });
}

/// Benchmark: named steps, which resolve labels at every call.
fn bench_named_step(c: &mut Criterion) {
    let model = reference_mdp(CELLS, 42).unwrap();
    let config = SimulatorConfig::default()
        .seed(7)
        .action_mode(ActionMode::GlobalNames);
    let mut sim = create_simulator_with(&model, &config).unwrap();
    let actions: Vec<Action> = ACTIONS.iter().map(|a| Action::from(*a)).collect();

    c.bench_function("sim_named_step_1k", |b| {
        b.iter(|| {
            sim.restart().unwrap();
            for i in 0..EPISODE {
                if sim.is_done() {
                    sim.restart().unwrap();
                }
                let r = sim.step(Some(actions[i % actions.len()].clone())).unwrap();
                black_box(r);
            }
        });
    });
}

/// Benchmark: program-level reporting, which builds a JSON record per step.
fn bench_program_level_random_step(c: &mut Criterion) {
    let model = reference_mdp(CELLS, 42).unwrap();
    let config = SimulatorConfig::default()
        .seed(7)
        .observation_mode(ObservationMode::ProgramLevel);
    let mut sim = create_simulator_with(&model, &config).unwrap();

    c.bench_function("sim_program_level_random_step_1k", |b| {
        b.iter(|| {
            sim.restart().unwrap();
            for _ in 0..EPISODE {
                if sim.is_done() {
                    sim.restart().unwrap();
                }
                black_box(sim.random_step().unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_engine_random_step,
    bench_indexed_step,
    bench_named_step,
    bench_program_level_random_step
);
criterion_main!(benches);
