//! # Microbium Core
//!
//! The core simulation engine for Microbium, an artificial bacterial
//! evolution sandbox.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Per-cell metabolic networks with evolvable reaction weights
//! - Cell lifecycle management (feeding, division, starvation)
//! - Population-level generational loop with food allocation
//! - Mutation of reaction weights on a sigmoid random walk
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! The simulation follows a data-oriented design with:
//! - **Plain-data structures**: nodes, edges and mutators live in
//!   `microbium_data` and carry no behavior
//! - **Logic at the seams**: mutation logic attaches to the data types
//!   through traits in this crate
//! - **Parallel processing**: Rayon-powered division and feeding across
//!   the population
//! - **Deterministic simulation**: seeded RNG streams for reproducible
//!   results regardless of thread count
//!
//! ## Example
//!
//! ```
//! use microbium_core::config::{CellConfig, PopulationConfig};
//! use microbium_core::food::StaticSupply;
//! use microbium_core::pathways::sugar_cell;
//! use microbium_core::population::Population;
//! use microbium_data::CellId;
//! use uuid::Uuid;
//!
//! // Found a single-cell population on the default glucose diet
//! let founder = sugar_cell(CellId(0), Uuid::from_u128(1), CellConfig::default()).unwrap();
//! let config = PopulationConfig {
//!     seed: Some(42),
//!     ..PopulationConfig::default()
//! };
//! let mut population =
//!     Population::new(vec![founder], Box::new(StaticSupply::default()), config);
//!
//! let summary = population.advance_generation().unwrap();
//! assert_eq!(summary.population, 1);
//! ```

/// Division of a food offer across the population
pub mod allocation;
/// Cell lifecycle (feeding, survival, reproduction)
pub mod cell;
/// Configuration management for simulation parameters
pub mod config;
/// Error types for simulation operations
pub mod error;
/// Food supplies that drive each generation's offer
pub mod food;
/// Performance metrics collection and logging
pub mod metrics;
/// Weight mutation on a sigmoid random walk
pub mod mutation;
/// Directed metabolic network and its timestep
pub mod network;
/// Ready-made metabolic wiring for the reference sugar cell
pub mod pathways;
/// Synchronized generational evolution of a population
pub mod population;
/// Seeded RNG streams for deterministic parallelism
pub mod rng;
/// Serializable point-in-time views of cells
pub mod snapshot;

pub use allocation::{allocate, AllocationPolicy};
pub use cell::Cell;
pub use config::{CellConfig, PopulationConfig, SimConfig, SupplyConfig, SupplyKind};
pub use error::{Result, SimError};
pub use food::{FoodSupply, PeriodicSupply, StaticSupply, Wave};
pub use metrics::{init_logging, Metrics};
pub use microbium_data::{
    CellId, CostBasis, EdgeParams, FoodMap, GenerationSummary, Node, WeightMutator,
};
pub use mutation::MutatorLogic;
pub use network::{MetabolicNetwork, StepOptions, ATP_NODE};
pub use pathways::sugar_cell;
pub use population::Population;
pub use snapshot::{CellSnapshot, EdgeSnapshot};
