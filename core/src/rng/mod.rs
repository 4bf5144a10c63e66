//! Deterministic random number generation
//!
//! All randomness in the simulator flows through [`SimRng`]. There is no
//! ambient RNG anywhere: the seed is part of the configuration, so a run
//! is reproducible bit for bit.

mod xorshift;

pub use xorshift::SimRng;
