//! Division of an offered food pool across the population.

use crate::error::{Result, SimError};
use microbium_data::FoodMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a per-generation food offer is split between cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum AllocationPolicy {
    /// Every cell receives exactly `quantity / population`.
    Continuous,
    /// Food is cut into units of `granularity` first. Whole units are dealt
    /// out as evenly as possible and the leftover units go to randomly
    /// chosen cells, so with 139 units of bread and 3 cells somebody gets
    /// the extra slice. Sub-unit remainder is discarded.
    IntegerUnits { granularity: f64 },
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        AllocationPolicy::IntegerUnits { granularity: 1.0 }
    }
}

/// Splits `offered` across `population` cells under the given policy.
///
/// Returns one food mapping per cell, in cell order. Lucky-cell placement
/// under [`AllocationPolicy::IntegerUnits`] is driven entirely by `rng`.
pub fn allocate<R: Rng>(
    policy: AllocationPolicy,
    offered: &FoodMap,
    population: usize,
    rng: &mut R,
) -> Result<Vec<FoodMap>> {
    if population == 0 {
        return Err(SimError::configuration(
            "cannot allocate food across an empty population",
        ));
    }
    let mut shares = vec![FoodMap::new(); population];
    for (name, &quantity) in offered {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(SimError::configuration(format!(
                "offered quantity {quantity} of '{name}' must be finite and non-negative"
            )));
        }
        match policy {
            AllocationPolicy::Continuous => {
                let per_cell = quantity / population as f64;
                for share in &mut shares {
                    share.insert(name.clone(), per_cell);
                }
            }
            AllocationPolicy::IntegerUnits { granularity } => {
                if !granularity.is_finite() || granularity <= 0.0 {
                    return Err(SimError::configuration(format!(
                        "allocation granularity {granularity} must be finite and positive"
                    )));
                }
                let units = (quantity / granularity).floor() as u64;
                let base = units / population as u64;
                let extras = (units % population as u64) as usize;
                let mut per_cell: Vec<u64> = (0..population)
                    .map(|idx| if idx < extras { base + 1 } else { base })
                    .collect();
                per_cell.shuffle(rng);
                for (share, units) in shares.iter_mut().zip(per_cell) {
                    share.insert(name.clone(), units as f64 * granularity);
                }
            }
        }
    }
    Ok(shares)
}
