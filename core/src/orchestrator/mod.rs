//! Orchestrator - the round loop
//!
//! Builds the population from a validated configuration and drives full
//! rounds of pairwise alignment.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    ConfigError, GoalStateSeed, InitialValues, Orchestrator, RoundMode, RoundResult,
    SimulationConfig,
};
