use anyhow::{Context, Result};
use clap::Parser;
use microbium_core::config::SimConfig;
use microbium_core::metrics::{init_logging, Metrics};
use microbium_core::pathways::sugar_cell;
use microbium_core::population::Population;
use microbium_core::rng;
use microbium_data::CellId;
use rand::Rng;
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of generations to simulate
    #[arg(short, long, default_value_t = 200)]
    generations: u64,

    /// Override the configured rng seed
    #[arg(short, long)]
    seed: Option<u64>,
}

fn load_config(path: &str) -> Result<SimConfig> {
    if Path::new(path).exists() {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
        SimConfig::from_toml(&content).with_context(|| format!("invalid config in {path}"))
    } else {
        tracing::warn!(path = path, "config file not found, using defaults");
        Ok(SimConfig::default())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.population.seed = Some(seed);
    }
    let seed = config.population.seed.unwrap_or_else(rand::random);
    config.population.seed = Some(seed);

    tracing::info!(
        seed = seed,
        fingerprint = %config.fingerprint(),
        generations = args.generations,
        "starting simulation"
    );

    let mut founders = Vec::with_capacity(config.population.initial_cells);
    for index in 0..config.population.initial_cells {
        let id = CellId(index as u64);
        let mut stream = rng::cell_stream(seed, id);
        let lineage = Uuid::from_u128(stream.gen());
        founders.push(sugar_cell(id, lineage, config.cell.clone())?);
    }

    let supply = config.supply.build();
    let mut population = Population::new(founders, supply, config.population.clone());

    let metrics = Metrics::new();
    for _ in 0..args.generations {
        let started = Instant::now();
        let summary = population.advance_generation()?;
        metrics.record_generation(started.elapsed(), &summary);
        if summary.population == 0 {
            tracing::warn!(generation = summary.index, "run ended in extinction");
            break;
        }
    }

    if let Some(best) = population
        .cells()
        .iter()
        .max_by(|a, b| a.atp().total_cmp(&b.atp()))
    {
        let snapshot = best.snapshot();
        tracing::info!(
            cell = %snapshot.id,
            atp = snapshot.atp,
            generation = snapshot.generation,
            age = snapshot.age,
            "fittest surviving cell"
        );
        tracing::debug!(
            detail = %serde_json::to_string(&snapshot)?,
            "fittest cell network"
        );
    }

    tracing::info!(
        generations = metrics.generation_count(),
        population = metrics.cell_count(),
        births = metrics.birth_count(),
        deaths = metrics.death_count(),
        elapsed_s = metrics.elapsed().as_secs_f64(),
        "simulation complete"
    );
    Ok(())
}
