//! Ready-made metabolic wiring for the reference sugar-eating cell.
//!
//! Each sugar runs through the same three-stage pipeline: the raw sugar is
//! transported into the cell, bound to an enzyme complex and finally burned
//! for ATP. Transport stages pay ATP per unit moved, the burn stage pays
//! nothing and yields a multiple of what it consumes.

use crate::cell::Cell;
use crate::config::CellConfig;
use crate::error::Result;
use crate::network::ATP_NODE;
use microbium_data::{CellId, EdgeParams};
use uuid::Uuid;

/// ATP paid per unit pulled through a transport stage.
pub const TRANSPORT_ATP_COST: f64 = 0.5;
/// ATP yielded per unit of enzyme complex burned.
pub const SYNTHESIS_SCALE: f64 = 6.0;

struct SugarChain {
    food: &'static str,
    transport_weight: f64,
    enzyme_weight: f64,
    synthesis_weight: f64,
    noise_sd: f64,
}

/// Glucose starts strong, lactose is workable, sucrose metabolism is
/// vestigial and only reachable through mutation.
const SUGAR_CHAINS: [SugarChain; 3] = [
    SugarChain {
        food: "glucose",
        transport_weight: 0.8,
        enzyme_weight: 0.8,
        synthesis_weight: 0.8,
        noise_sd: 0.02,
    },
    SugarChain {
        food: "sucrose",
        transport_weight: 1e-12,
        enzyme_weight: 1e-12,
        synthesis_weight: 1e-12,
        noise_sd: 0.001,
    },
    SugarChain {
        food: "lactose",
        transport_weight: 0.7,
        enzyme_weight: 0.5,
        synthesis_weight: 0.5,
        noise_sd: 0.02,
    },
];

/// Builds a cell that can metabolize glucose, sucrose and lactose.
///
/// The returned cell is the standard founder for simulations: ten nodes
/// (the atp pool plus three stages per sugar) and nine evolvable edges.
pub fn sugar_cell(id: CellId, lineage: Uuid, config: CellConfig) -> Result<Cell> {
    let mut cell = Cell::new(id, lineage, config);
    for chain in &SUGAR_CHAINS {
        let transported = format!("transported_{}", chain.food);
        let complex = format!("{}_enzyme_complex", chain.food);
        cell.add_node(chain.food, 0.0, "extracellular sugar")?;
        cell.add_node(&transported, 0.0, "sugar moved across the membrane")?;
        cell.add_node(&complex, 0.0, "sugar bound to its catabolic enzyme")?;
        cell.add_edge(
            chain.food,
            &transported,
            EdgeParams::new(chain.transport_weight).with_atp_cost(TRANSPORT_ATP_COST),
            chain.noise_sd,
        )?;
        cell.add_edge(
            &transported,
            &complex,
            EdgeParams::new(chain.enzyme_weight).with_atp_cost(TRANSPORT_ATP_COST),
            chain.noise_sd,
        )?;
        cell.add_edge(
            &complex,
            ATP_NODE,
            EdgeParams::new(chain.synthesis_weight).with_scale(SYNTHESIS_SCALE),
            chain.noise_sd,
        )?;
    }
    Ok(cell)
}
