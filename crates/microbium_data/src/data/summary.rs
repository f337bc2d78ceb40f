use super::cell::FoodMap;
use serde::{Deserialize, Serialize};

/// Per-generation report emitted by the population loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Generation index after this step (1 for the first completed step).
    pub index: u64,
    /// Cells alive after survival filtering.
    pub population: usize,
    /// Daughters created during replication.
    pub births: usize,
    /// Candidates that failed the survival check.
    pub deaths: usize,
    /// Distinct founder lineages among the survivors.
    pub lineages: usize,
    /// Total food offered by the supply this generation.
    pub offered: FoodMap,
}
