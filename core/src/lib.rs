//! Goal Alignment Core - Rust Engine
//!
//! Deterministic multi-agent simulation of goal convergence across a
//! three-tier goal hierarchy (high/mid/low) via pairwise value exchange.
//!
//! # Architecture
//!
//! - **models**: Domain types (GoalSet, GoalState, Agent, SimulationState)
//! - **alignment**: Pairwise alignment algorithm with cross-tier leak
//! - **orchestrator**: Configuration, validation, and the round loop
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded RNG, no ambient randomness)
//! 2. Goal iteration order is insertion order, never hash order
//! 3. Goal values are never clamped; divergence is monitored, not thrown
//! 4. Within one round, an agent's state is mutated only by its own step

// Module declarations
pub mod alignment;
pub mod models;
pub mod orchestrator;
pub mod rng;

// Re-exports for convenience
pub use alignment::{align_pair, PairStats};
pub use models::{
    agent::{Agent, AgentSnapshot},
    goals::{GoalCatalog, GoalSet, GoalState, Tier},
    state::SimulationState,
};
pub use orchestrator::{
    ConfigError, GoalStateSeed, InitialValues, Orchestrator, RoundMode, RoundResult,
    SimulationConfig,
};
pub use rng::SimRng;
