//! Synchronized generational evolution of a cell population.
//!
//! Each generation runs in three phases: cells above the reproduction
//! threshold divide, the supply's offer is allocated across the enlarged
//! population, and every cell is fed and stepped in parallel. Cells below
//! the survival threshold are then removed.
//!
//! A generation either commits fully or not at all. All work happens on a
//! scratch copy of the population and is swapped in only once every phase
//! has succeeded, so a misconfigured supply cannot leave the population
//! half-updated.

use crate::allocation;
use crate::cell::Cell;
use crate::config::PopulationConfig;
use crate::error::{Result, SimError};
use crate::food::FoodSupply;
use crate::rng;
use microbium_data::{CellId, GenerationSummary};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::BTreeSet;
use uuid::Uuid;

/// A population of cells sharing one food supply.
pub struct Population {
    cells: Vec<Cell>,
    supply: Box<dyn FoodSupply>,
    config: PopulationConfig,
    base_seed: u64,
    master: ChaCha8Rng,
    total_created: u64,
    generation: u64,
}

impl Population {
    /// Creates a population from founder cells and a food supply.
    ///
    /// The founders' ids are taken as given; ids handed to daughters start
    /// counting from the founder count, so founders should be numbered
    /// densely from zero if daughter ids must stay distinct from theirs.
    /// When the config carries no seed a
    /// random one is drawn, so runs are only reproducible if the resolved
    /// seed (see [`Population::base_seed`]) is recorded.
    #[must_use]
    pub fn new(cells: Vec<Cell>, supply: Box<dyn FoodSupply>, config: PopulationConfig) -> Self {
        let base_seed = config.seed.unwrap_or_else(rand::random);
        let master = rng::master_rng(base_seed);
        let total_created = cells.len() as u64;
        Self {
            cells,
            supply,
            config,
            base_seed,
            master,
            total_created,
            generation: 0,
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of generations that have committed.
    #[must_use]
    pub fn generation_index(&self) -> u64 {
        self.generation
    }

    /// Count of all cells ever created, founders included.
    #[must_use]
    pub fn total_created(&self) -> u64 {
        self.total_created
    }

    /// The seed this run resolved to.
    #[must_use]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Runs one full generation and reports what happened.
    ///
    /// Fails without side effects on the population if it is already
    /// extinct, or if allocation or feeding rejects the offer.
    pub fn advance_generation(&mut self) -> Result<GenerationSummary> {
        if self.cells.is_empty() {
            return Err(SimError::configuration(
                "cannot advance an extinct population",
            ));
        }

        let scratch = self.cells.clone();
        let (mut next, births) = self.replicate(scratch)?;

        let offered = self.supply.available();
        let shares = allocation::allocate(
            self.config.allocation,
            &offered,
            next.len(),
            &mut self.master,
        )?;

        let steps = self.config.steps_per_generation;
        let alive: Vec<bool> = next
            .par_iter_mut()
            .zip(&shares)
            .map(|(cell, share)| cell.feed_and_step(share, steps))
            .collect::<Result<_>>()?;

        let fed = next.len();
        let survivors: Vec<Cell> = next
            .into_iter()
            .zip(alive)
            .filter_map(|(cell, alive)| alive.then_some(cell))
            .collect();
        let deaths = fed - survivors.len();
        let lineages = survivors
            .iter()
            .map(Cell::lineage)
            .collect::<BTreeSet<Uuid>>()
            .len();

        self.cells = survivors;
        self.total_created += births as u64;
        self.generation += 1;

        let summary = GenerationSummary {
            index: self.generation,
            population: self.cells.len(),
            births,
            deaths,
            lineages,
            offered,
        };
        if self.cells.is_empty() {
            tracing::warn!(generation = self.generation, "population went extinct");
        } else {
            tracing::debug!(
                generation = self.generation,
                population = summary.population,
                births = summary.births,
                deaths = summary.deaths,
                "generation complete"
            );
        }
        Ok(summary)
    }

    /// Runs up to `count` generations, stopping early on extinction.
    pub fn advance_generations(&mut self, count: u64) -> Result<Vec<GenerationSummary>> {
        let mut summaries = Vec::new();
        for _ in 0..count {
            let summary = self.advance_generation()?;
            let extinct = summary.population == 0;
            summaries.push(summary);
            if extinct {
                break;
            }
        }
        Ok(summaries)
    }

    /// Divides every living cell above its reproduction threshold.
    ///
    /// Daughter ids are assigned in population order before any division
    /// runs, and each division draws from an rng stream derived from the
    /// daughter's id. Thread scheduling therefore cannot change either the
    /// ids or the mutations. Daughters are placed directly after their
    /// parents.
    fn replicate(&self, parents: Vec<Cell>) -> Result<(Vec<Cell>, usize)> {
        let mut next_id = self.total_created;
        let mut jobs: Vec<(Cell, Option<CellId>)> = parents
            .into_iter()
            .map(|cell| {
                let daughter_id = (cell.is_alive() && cell.can_reproduce()).then(|| {
                    let id = CellId(next_id);
                    next_id += 1;
                    id
                });
                (cell, daughter_id)
            })
            .collect();

        let base_seed = self.base_seed;
        let daughters: Vec<Option<Cell>> = jobs
            .par_iter_mut()
            .map(|(cell, daughter_id)| match daughter_id {
                Some(id) => {
                    let mut stream = rng::cell_stream(base_seed, *id);
                    cell.divide(*id, &mut stream).map(Some)
                }
                None => Ok(None),
            })
            .collect::<Result<_>>()?;

        let births = daughters.iter().filter(|d| d.is_some()).count();
        let mut next = Vec::with_capacity(jobs.len() + births);
        for ((cell, _), daughter) in jobs.into_iter().zip(daughters) {
            next.push(cell);
            if let Some(daughter) = daughter {
                next.push(daughter);
            }
        }
        Ok((next, births))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AllocationPolicy;
    use crate::config::CellConfig;
    use crate::food::StaticSupply;
    use crate::network::ATP_NODE;
    use microbium_data::{EdgeParams, FoodMap};

    fn founder(id: u64, config: CellConfig) -> Cell {
        let mut cell = Cell::new(CellId(id), Uuid::from_u128(u128::from(id) + 1), config);
        cell.add_node("glucose", 0.0, "").unwrap();
        cell.add_edge("glucose", ATP_NODE, EdgeParams::new(0.5), 0.02)
            .unwrap();
        cell
    }

    fn hardy(initial_atp: f64, reproduction_atp: f64) -> CellConfig {
        CellConfig {
            initial_atp,
            survival_atp: 0.0,
            reproduction_atp,
            max_edge_throughput: None,
            ..CellConfig::default()
        }
    }

    fn supply(entries: &[(&str, f64)]) -> Box<StaticSupply> {
        let offer: FoodMap = entries
            .iter()
            .map(|&(name, quantity)| (name.to_string(), quantity))
            .collect();
        Box::new(StaticSupply::new(offer))
    }

    fn pop_config(seed: u64) -> PopulationConfig {
        PopulationConfig {
            seed: Some(seed),
            allocation: AllocationPolicy::Continuous,
            ..PopulationConfig::default()
        }
    }

    #[test]
    fn test_empty_population_cannot_advance() {
        let mut pop = Population::new(vec![], supply(&[]), pop_config(1));
        let err = pop.advance_generation().unwrap_err();
        assert!(err.to_string().contains("extinct"));
    }

    #[test]
    fn test_non_reproducers_pass_through() {
        let cells = vec![founder(0, hardy(50.0, 100.0)), founder(1, hardy(50.0, 100.0))];
        let mut pop = Population::new(cells, supply(&[("glucose", 4.0)]), pop_config(1));
        let summary = pop.advance_generation().unwrap();
        assert_eq!(summary.births, 0);
        assert_eq!(summary.deaths, 0);
        assert_eq!(summary.population, 2);
        let ids: Vec<u64> = pop.cells().iter().map(|c| c.id().0).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_daughters_sit_next_to_parents() {
        let cells = vec![founder(0, hardy(200.0, 100.0)), founder(1, hardy(200.0, 100.0))];
        let mut pop = Population::new(cells, supply(&[]), pop_config(1));
        let summary = pop.advance_generation().unwrap();
        assert_eq!(summary.births, 2);
        assert_eq!(summary.population, 4);
        let ids: Vec<u64> = pop.cells().iter().map(|c| c.id().0).collect();
        assert_eq!(ids, vec![0, 2, 1, 3]);
        let generations: Vec<u32> = pop.cells().iter().map(Cell::generation).collect();
        assert_eq!(generations, vec![0, 1, 0, 1]);
        assert_eq!(pop.total_created(), 4);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let cells = vec![founder(0, hardy(200.0, 100.0))];
        let mut pop = Population::new(cells, supply(&[]), pop_config(3));
        pop.advance_generation().unwrap();
        pop.advance_generation().unwrap();
        assert_eq!(pop.len(), 4);
        assert_eq!(pop.total_created(), 4);
        let ids: BTreeSet<u64> = pop.cells().iter().map(|c| c.id().0).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_dead_cells_are_dropped() {
        let config = CellConfig {
            initial_atp: 10.0,
            survival_atp: 30.0,
            ..CellConfig::default()
        };
        let cells = vec![founder(0, config.clone()), founder(1, config)];
        let mut pop = Population::new(cells, supply(&[]), pop_config(1));
        let summary = pop.advance_generation().unwrap();
        assert_eq!(summary.population, 0);
        assert_eq!(summary.deaths, 2);
        assert!(pop.is_empty());
        assert!(pop.advance_generation().is_err());
    }

    #[test]
    fn test_dead_cells_do_not_reproduce() {
        let config = CellConfig {
            initial_atp: 10.0,
            survival_atp: 30.0,
            reproduction_atp: 5.0,
            ..CellConfig::default()
        };
        let mut pop = Population::new(vec![founder(0, config)], supply(&[]), pop_config(1));
        let summary = pop.advance_generation().unwrap();
        assert_eq!(summary.births, 0);
        assert_eq!(summary.deaths, 1);
        assert_eq!(summary.population, 0);
        assert!(pop.is_empty());
    }

    #[test]
    fn test_failed_generation_leaves_population_intact() {
        let cells = vec![founder(0, hardy(50.0, 100.0))];
        let mut pop = Population::new(cells, supply(&[("ribose", 5.0)]), pop_config(1));
        assert!(pop.advance_generation().is_err());
        assert_eq!(pop.len(), 1);
        assert_eq!(pop.generation_index(), 0);
        assert_eq!(pop.total_created(), 1);
        assert_eq!(pop.cells()[0].age(), 0);
    }

    #[test]
    fn test_summary_reports_offer_and_lineages() {
        let cells = vec![founder(0, hardy(200.0, 100.0))];
        let mut pop = Population::new(cells, supply(&[("glucose", 6.0)]), pop_config(1));
        let summary = pop.advance_generation().unwrap();
        assert_eq!(summary.index, 1);
        assert_eq!(summary.population, 2);
        assert_eq!(summary.births, 1);
        assert_eq!(summary.lineages, 1);
        assert_eq!(summary.offered["glucose"], 6.0);
        assert_eq!(pop.generation_index(), 1);
    }

    #[test]
    fn test_generation_advances_on_a_worker_thread() {
        let cells = vec![founder(0, hardy(200.0, 100.0))];
        let mut pop = Population::new(cells, supply(&[("glucose", 6.0)]), pop_config(1));
        let handle = std::thread::spawn(move || {
            pop.advance_generation().map(|summary| summary.population)
        });
        assert_eq!(handle.join().unwrap().unwrap(), 2);
    }

    #[test]
    fn test_advance_generations_stops_at_extinction() {
        let config = CellConfig {
            initial_atp: 10.0,
            survival_atp: 30.0,
            ..CellConfig::default()
        };
        let mut pop = Population::new(vec![founder(0, config)], supply(&[]), pop_config(1));
        let summaries = pop.advance_generations(10).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].population, 0);
    }
}
