//! Cell lifecycle: feeding, survival and reproduction.

use crate::config::CellConfig;
use crate::error::{Result, SimError};
use crate::network::{MetabolicNetwork, StepOptions};
use crate::snapshot::CellSnapshot;
use microbium_data::{CellId, EdgeParams, FoodMap, Node};
use rand::Rng;
use uuid::Uuid;

/// One artificial cell: a metabolic network plus identity metadata.
///
/// Cells are plain values. Cloning one yields a fully independent copy of
/// its network, which is exactly what reproduction needs.
#[derive(Debug, Clone)]
pub struct Cell {
    id: CellId,
    lineage: Uuid,
    generation: u32,
    age: u64,
    config: CellConfig,
    network: MetabolicNetwork,
    last_food: Option<FoodMap>,
}

impl Cell {
    /// Creates a generation-zero cell whose network holds only the atp
    /// pool, charged to `config.initial_atp`.
    #[must_use]
    pub fn new(id: CellId, lineage: Uuid, config: CellConfig) -> Self {
        let network = MetabolicNetwork::new(config.initial_atp);
        Self {
            id,
            lineage,
            generation: 0,
            age: 0,
            config,
            network,
            last_food: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> CellId {
        self.id
    }

    #[must_use]
    pub fn lineage(&self) -> Uuid {
        self.lineage
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn age(&self) -> u64 {
        self.age
    }

    #[must_use]
    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    /// Read-only view of the metabolic network.
    #[must_use]
    pub fn network(&self) -> &MetabolicNetwork {
        &self.network
    }

    /// Food mapping from the most recent feeding, if any.
    #[must_use]
    pub fn last_food(&self) -> Option<&FoodMap> {
        self.last_food.as_ref()
    }

    /// Adds a metabolite pool to this cell's network.
    pub fn add_node(&mut self, name: &str, amount: f64, description: &str) -> Result<()> {
        self.network.add_node(name, amount, description)
    }

    /// Adds a reaction edge to this cell's network.
    pub fn add_edge(
        &mut self,
        source: &str,
        dest: &str,
        params: EdgeParams,
        noise_sd: f64,
    ) -> Result<()> {
        self.network.add_edge(source, dest, params, noise_sd)
    }

    /// Current ATP level.
    #[must_use]
    pub fn atp(&self) -> f64 {
        self.network.atp()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.atp() >= self.config.survival_atp
    }

    #[must_use]
    pub fn can_reproduce(&self) -> bool {
        self.atp() >= self.config.reproduction_atp
    }

    /// Current amount of the named node.
    pub fn node_amount(&self, name: &str) -> Result<f64> {
        self.network.node_amount(name)
    }

    /// Current weight of the named edge.
    pub fn edge_weight(&self, source: &str, dest: &str) -> Result<f64> {
        self.network.edge_weight(source, dest)
    }

    /// All nodes of the network, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.network.nodes()
    }

    /// All edges of the network as `(source, dest, params)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &EdgeParams)> {
        self.network.edges()
    }

    /// Serializable view of the cell's current state.
    #[must_use]
    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot::capture(self)
    }

    fn step_options(&self) -> StepOptions {
        StepOptions {
            penalize_underflow: self.config.penalize_underflow,
            throughput_cap: self.config.max_edge_throughput,
            cost_basis: self.config.atp_cost_basis,
        }
    }

    /// Overwrites the named food nodes with the supplied quantities, runs
    /// the given number of timesteps and reports whether the cell is still
    /// alive.
    ///
    /// Every food name is checked against the node table before anything is
    /// written, so an unknown name fails without partial effects. When
    /// `reset_food_after_step` is set, the named nodes are zeroed again
    /// after the last step; otherwise unconsumed food carries over.
    pub fn feed_and_step(&mut self, food: &FoodMap, steps: u32) -> Result<bool> {
        let mut slots = Vec::with_capacity(food.len());
        for (name, &quantity) in food {
            let idx = self.network.index_of(name).ok_or_else(|| {
                SimError::configuration(format!(
                    "unknown food type '{name}' for cell {}",
                    self.id
                ))
            })?;
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(SimError::configuration(format!(
                    "food quantity {quantity} of '{name}' must be finite and non-negative"
                )));
            }
            slots.push((idx, quantity));
        }
        for &(idx, quantity) in &slots {
            self.network.set_amount_at(idx, quantity);
        }
        let opts = self.step_options();
        for _ in 0..steps {
            self.network.advance_one_step(&opts)?;
        }
        self.age += u64::from(steps);
        self.last_food = Some(food.clone());
        if self.config.reset_food_after_step {
            for &(idx, _) in &slots {
                self.network.set_amount_at(idx, 0.0);
            }
        }
        Ok(self.is_alive())
    }

    /// Deep-copies this cell under a new id, one generation down.
    ///
    /// Age, lineage, config and the last food snapshot are inherited
    /// unchanged. With `split_amounts_on_division` every node amount is
    /// halved in parent and daughter symmetrically.
    pub fn clone_with_id(&mut self, id: CellId) -> Cell {
        let mut daughter = self.clone();
        daughter.id = id;
        daughter.generation = self.generation + 1;
        if self.config.split_amounts_on_division {
            self.network.halve_amounts();
            daughter.network.halve_amounts();
        }
        daughter
    }

    /// Mutates every edge weight through its bound mutator.
    pub fn evolve<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        self.network.mutate_weights(rng)
    }

    /// Reproduction: a deep copy that is then mutated. The parent's weights
    /// are untouched.
    pub fn divide<R: Rng>(&mut self, id: CellId, rng: &mut R) -> Result<Cell> {
        let mut daughter = self.clone_with_id(id);
        daughter.evolve(rng)?;
        Ok(daughter)
    }
}
