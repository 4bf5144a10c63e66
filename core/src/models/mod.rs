//! Domain models for the goal alignment simulator

pub mod agent;
pub mod goals;
pub mod state;

// Re-exports
pub use agent::{Agent, AgentSnapshot};
pub use goals::{GoalCatalog, GoalSet, GoalState, Tier};
pub use state::SimulationState;
