//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section and field has a default, so a
//! partial file (or none at all) still yields a runnable simulation.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [population]
//! initial_cells = 4
//! seed = 42
//! steps_per_generation = 1
//!
//! [population.allocation]
//! policy = "integer-units"
//! granularity = 10.0
//!
//! [cell]
//! initial_atp = 65.0
//! survival_atp = 30.0
//! reproduction_atp = 100.0
//! reset_food_after_step = true
//!
//! [supply]
//! kind = "periodic"
//! ```

use crate::allocation::AllocationPolicy;
use crate::food::{FoodSupply, PeriodicSupply, StaticSupply, Wave};
use microbium_data::{CostBasis, FoodMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Population-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PopulationConfig {
    pub initial_cells: usize,
    pub seed: Option<u64>,
    pub steps_per_generation: u32,
    pub allocation: AllocationPolicy,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_cells: 1,
            seed: None,
            steps_per_generation: 1,
            allocation: AllocationPolicy::default(),
        }
    }
}

/// Per-cell thresholds and timestep behavior.
///
/// Every cell carries a copy of this, so a population can in principle mix
/// cells built under different settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CellConfig {
    pub initial_atp: f64,
    pub survival_atp: f64,
    pub reproduction_atp: f64,
    /// Upper bound on the share any single edge may process per step.
    pub max_edge_throughput: Option<f64>,
    /// Zero the fed nodes after stepping instead of letting leftovers pool.
    pub reset_food_after_step: bool,
    /// Charge starved edges as if they had processed a full weight's worth.
    pub penalize_underflow: bool,
    /// Halve all node amounts in parent and daughter on division.
    pub split_amounts_on_division: bool,
    pub atp_cost_basis: CostBasis,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            initial_atp: 65.0,
            survival_atp: 30.0,
            reproduction_atp: 100.0,
            max_edge_throughput: Some(10.0),
            reset_food_after_step: false,
            penalize_underflow: false,
            split_amounts_on_division: false,
            atp_cost_basis: CostBasis::default(),
        }
    }
}

/// Which kind of food supply drives the run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SupplyKind {
    #[default]
    Static,
    Periodic,
}

/// Food supply configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SupplyConfig {
    pub kind: SupplyKind,
    /// Offer used by a static supply.
    pub amounts: FoodMap,
    /// Waves used by a periodic supply. Empty means the built-in
    /// three-sugar cycle.
    pub waves: BTreeMap<String, Wave>,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            kind: SupplyKind::Static,
            amounts: StaticSupply::default().offer().clone(),
            waves: BTreeMap::new(),
        }
    }
}

impl SupplyConfig {
    /// Instantiates the configured supply.
    #[must_use]
    pub fn build(&self) -> Box<dyn FoodSupply> {
        match self.kind {
            SupplyKind::Static => Box::new(StaticSupply::new(self.amounts.clone())),
            SupplyKind::Periodic => {
                if self.waves.is_empty() {
                    Box::new(PeriodicSupply::three_sugar_cycle())
                } else {
                    Box::new(PeriodicSupply::new(self.waves.clone()))
                }
            }
        }
    }
}

/// Top-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    pub population: PopulationConfig,
    pub cell: CellConfig,
    pub supply: SupplyConfig,
}

impl SimConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a
    /// description of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // Population validation
        anyhow::ensure!(
            self.population.initial_cells > 0,
            "Initial cell count must be positive"
        );
        anyhow::ensure!(
            self.population.initial_cells <= 10_000,
            "Initial cell count too large (max 10000)"
        );
        anyhow::ensure!(
            self.population.steps_per_generation > 0,
            "Steps per generation must be positive"
        );
        if let AllocationPolicy::IntegerUnits { granularity } = self.population.allocation {
            anyhow::ensure!(
                granularity.is_finite() && granularity > 0.0,
                "Allocation granularity must be finite and positive"
            );
        }

        // Cell validation
        anyhow::ensure!(
            self.cell.initial_atp.is_finite() && self.cell.initial_atp >= 0.0,
            "Initial ATP must be finite and non-negative"
        );
        anyhow::ensure!(
            self.cell.survival_atp.is_finite() && self.cell.survival_atp >= 0.0,
            "Survival ATP must be finite and non-negative"
        );
        anyhow::ensure!(
            self.cell.reproduction_atp.is_finite() && self.cell.reproduction_atp >= 0.0,
            "Reproduction ATP must be finite and non-negative"
        );
        if let Some(cap) = self.cell.max_edge_throughput {
            // `inf` is legal toml and means uncapped
            anyhow::ensure!(
                !cap.is_nan() && cap > 0.0,
                "Edge throughput cap must be positive"
            );
        }

        // Supply validation
        for (name, &quantity) in &self.supply.amounts {
            anyhow::ensure!(
                quantity.is_finite() && quantity >= 0.0,
                "Offer for '{}' must be finite and non-negative",
                name
            );
        }
        for (name, wave) in &self.supply.waves {
            anyhow::ensure!(
                wave.amplitude.is_finite()
                    && wave.frequency.is_finite()
                    && wave.phase.is_finite()
                    && wave.baseline.is_finite(),
                "Wave '{}' has non-finite parameters",
                name
            );
            anyhow::ensure!(
                wave.baseline >= wave.amplitude.abs(),
                "Wave '{}' baseline must cover its amplitude",
                name
            );
        }

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Stable digest of the behavioral sections, independent of the seed.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.cell).as_bytes());
        hasher.update(format!("{:?}", self.supply).as_bytes());
        hex::encode(hasher.finalize())
    }
}
