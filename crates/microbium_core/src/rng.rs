//! Seeded random-number plumbing.
//!
//! All randomness in the simulation flows through explicitly constructed
//! generators: the population owns one master stream for allocation
//! shuffles, and every daughter cell mutates under a stream derived from
//! the run seed and its own id. Runs are therefore reproducible from a
//! single `u64` seed regardless of thread scheduling.

use microbium_data::CellId;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Multiplier separating derived streams (64-bit golden ratio).
const STREAM_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;

/// Creates the master generator for a run.
#[must_use]
pub fn master_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Derives an independent generator for one cell's mutation noise.
#[must_use]
pub fn cell_stream(base_seed: u64, cell: CellId) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(cell.0.wrapping_mul(STREAM_SPACING)))
}
