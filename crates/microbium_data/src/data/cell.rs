use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Food quantities keyed by food-type name.
///
/// Ordered so that iteration is stable wherever a food map drives
/// random-number consumption or log output.
pub type FoodMap = BTreeMap<String, f64>;

/// Unique identifier of a cell within one simulation run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CellId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Which per-edge quantity an ATP debit is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CostBasis {
    /// Charge per unit of product synthesized (drawn material times scale).
    #[default]
    Product,
    /// Charge per unit of source material processed.
    Processed,
}
