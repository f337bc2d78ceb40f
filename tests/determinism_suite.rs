//! Bit-for-bit reproducibility of whole runs.
//!
//! Runs are compared through JSON dumps of every cell snapshot, which
//! round-trip f64 values exactly. Any divergence in a weight, an amount or
//! an id between two runs with the same seed fails these tests.

use microbium_lib::rng;
use microbium_lib::{
    sugar_cell, Cell, CellConfig, CellId, CellSnapshot, PeriodicSupply, Population,
    PopulationConfig,
};
use rand::Rng;
use uuid::Uuid;

fn founders(seed: u64, count: u64) -> Vec<Cell> {
    let config = CellConfig {
        reproduction_atp: 80.0,
        ..CellConfig::default()
    };
    (0..count)
        .map(|index| {
            let id = CellId(index);
            let mut stream = rng::cell_stream(seed, id);
            let lineage = Uuid::from_u128(stream.gen());
            sugar_cell(id, lineage, config.clone()).unwrap()
        })
        .collect()
}

/// Runs a small periodic-supply simulation and dumps each generation's
/// full population state as JSON.
fn run(seed: u64, generations: u64) -> Vec<String> {
    let pop_config = PopulationConfig {
        initial_cells: 3,
        seed: Some(seed),
        ..PopulationConfig::default()
    };
    let mut population = Population::new(
        founders(seed, 3),
        Box::new(PeriodicSupply::three_sugar_cycle()),
        pop_config,
    );

    let mut states = Vec::new();
    for _ in 0..generations {
        population.advance_generation().unwrap();
        let snapshots: Vec<CellSnapshot> =
            population.cells().iter().map(CellSnapshot::capture).collect();
        states.push(serde_json::to_string(&snapshots).unwrap());
        if population.is_empty() {
            break;
        }
    }
    states
}

#[test]
fn test_same_seed_reproduces_every_generation() {
    let first = run(42, 8);
    let second = run(42, 8);
    assert_eq!(first.len(), second.len());
    for (generation, (a, b)) in first.iter().zip(&second).enumerate() {
        assert_eq!(a, b, "state diverged at generation {}", generation + 1);
    }
}

#[test]
fn test_different_seeds_diverge() {
    let first = run(42, 8);
    let second = run(43, 8);
    // Founder lineages already differ, so the very first dump must too
    assert_ne!(first[0], second[0]);
}

#[test]
fn test_thread_count_does_not_change_results() {
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| run(7, 8));
    let parallel = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(|| run(7, 8));
    assert_eq!(single, parallel);
}

#[test]
fn test_divisions_actually_occur() {
    let pop_config = PopulationConfig {
        initial_cells: 3,
        seed: Some(42),
        ..PopulationConfig::default()
    };
    let mut population = Population::new(
        founders(42, 3),
        Box::new(PeriodicSupply::three_sugar_cycle()),
        pop_config,
    );
    let summaries = population.advance_generations(8).unwrap();
    let births: usize = summaries.iter().map(|s| s.births).sum();
    assert!(births > 0, "expected at least one division in eight generations");
    assert!(population.len() > 3);
}
