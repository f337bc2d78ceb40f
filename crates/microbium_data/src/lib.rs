//! Plain, serializable data types shared by the microbium simulation crates.
//!
//! Everything here is dumb state: the logic that animates these types lives
//! in `microbium_core` behind its `*Logic` traits.

pub mod data;

pub use data::cell::{CellId, CostBasis, FoodMap};
pub use data::network::{EdgeParams, Node, WeightMutator};
pub use data::summary::GenerationSummary;
