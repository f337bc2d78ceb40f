//! # Microbium
//!
//! Artificial bacterial evolution: populations of cells whose metabolic
//! networks mutate as they compete for a shared food supply.
//!
//! This crate is the application shell. The simulation engine lives in
//! `microbium_core` and the plain data types in `microbium_data`; the
//! pieces needed to embed a simulation are re-exported here.

pub use microbium_core::rng;
pub use microbium_core::{
    allocate, init_logging, sugar_cell, AllocationPolicy, Cell, CellConfig, CellId, CellSnapshot,
    CostBasis, EdgeParams, FoodMap, FoodSupply, GenerationSummary, MetabolicNetwork, Metrics,
    MutatorLogic, Node, PeriodicSupply, Population, PopulationConfig, Result, SimConfig, SimError,
    StaticSupply, StepOptions, SupplyConfig, SupplyKind, Wave, WeightMutator, ATP_NODE,
};
