//! Serializable point-in-time views of cells.

use crate::cell::Cell;
use microbium_data::{CellId, Node};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One reaction edge as captured in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub source: String,
    pub dest: String,
    pub weight: f64,
    pub scale: f64,
    pub atp_cost: f64,
}

/// Full externally-visible state of one cell.
///
/// Snapshots are plain data: they serialize to JSON for logging and can be
/// compared structurally, which is how the determinism tests check that two
/// runs agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub id: CellId,
    pub lineage: Uuid,
    pub generation: u32,
    pub age: u64,
    pub atp: f64,
    pub alive: bool,
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeSnapshot>,
}

impl CellSnapshot {
    /// Captures the current state of a cell.
    #[must_use]
    pub fn capture(cell: &Cell) -> Self {
        Self {
            id: cell.id(),
            lineage: cell.lineage(),
            generation: cell.generation(),
            age: cell.age(),
            atp: cell.atp(),
            alive: cell.is_alive(),
            nodes: cell.nodes().cloned().collect(),
            edges: cell
                .edges()
                .map(|(source, dest, params)| EdgeSnapshot {
                    source: source.to_string(),
                    dest: dest.to_string(),
                    weight: params.weight,
                    scale: params.scale,
                    atp_cost: params.atp_cost,
                })
                .collect(),
        }
    }
}
