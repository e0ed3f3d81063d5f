//! RNG seed derivation utilities for deterministic session behavior.
//!
//! Each session carries one base seed; dealing and orientation draws use
//! separately derived sub-seeds so the two random streams never overlap and
//! each is reproducible on its own.

const MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derive the seed used to shuffle the spread for a session.
pub fn derive_dealing_seed(session_seed: u64) -> u64 {
    session_seed.wrapping_mul(MIX).wrapping_add(1)
}

/// Derive the seed for the orientation coin-flip stream of a session.
pub fn derive_orientation_seed(session_seed: u64) -> u64 {
    session_seed.wrapping_mul(MIX).wrapping_add(2)
}

/// Derive the base seed for the session that follows a reset.
pub fn derive_next_session_seed(session_seed: u64) -> u64 {
    session_seed.wrapping_mul(MIX).wrapping_add(3)
}
