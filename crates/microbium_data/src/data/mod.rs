//! Core data structures for the microbium simulation.

pub mod cell;
pub mod network;
pub mod summary;
