//! Simulation state
//!
//! The population: a fixed-size ordered sequence of agents. Order is
//! load-bearing in two places: each round visits agents in population
//! order, and each agent's step visits peers in population order. Under
//! sequential rounds, later agents therefore see earlier agents'
//! already-updated values.
//!
//! # Critical Invariants
//!
//! 1. **Fixed membership**: agents are neither added nor removed during
//!    a run.
//! 2. **Shared catalog**: every agent carries the same goal names at
//!    each tier (validated at construction).
//! 3. **Unique IDs**: each agent ID appears exactly once.

use crate::models::agent::{Agent, AgentSnapshot};
use crate::models::goals::Tier;

/// The fixed ordered set of agents participating in a run
///
/// # Example
///
/// ```rust
/// use goal_alignment_core::{Agent, GoalSet, GoalState, SimulationState};
///
/// let goals = |v: f64| GoalState::new(
///     GoalSet::from_values([("Safety", v)]),
///     GoalSet::from_values([("TrafficManagement", v)]),
///     GoalSet::from_values([("Braking", v)]),
///     0.1,
///     0.05,
/// );
/// let state = SimulationState::new(vec![
///     Agent::new("CAR_0".to_string(), goals(0.2)),
///     Agent::new("CAR_1".to_string(), goals(0.8)),
/// ]);
/// assert_eq!(state.num_agents(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// All agents, in population order
    agents: Vec<Agent>,
}

impl SimulationState {
    /// Create a new simulation state with the given agents
    ///
    /// Population order is the order of the input vector.
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// Number of agents in the population
    pub fn num_agents(&self) -> usize {
        self.agents.len()
    }

    /// All agents in population order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Get reference to an agent by ID
    pub fn get_agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id() == id)
    }

    /// Get mutable reference to an agent by ID
    pub fn get_agent_mut(&mut self, id: &str) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id() == id)
    }

    pub(crate) fn agent_at_mut(&mut self, index: usize) -> &mut Agent {
        &mut self.agents[index]
    }

    /// Snapshots of every agent, in population order
    pub fn agent_snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents.iter().map(Agent::snapshot).collect()
    }

    /// Spread of a tier's values across the population
    ///
    /// For each goal in the tier, takes max minus min across all agents,
    /// then returns the largest such spread. Zero means the population
    /// agrees on every goal at that tier; the measure contracts round
    /// over round for sane rates and is the caller's handle for spotting
    /// divergence (leak compounding is unbounded, values may leave
    /// [0, 1]).
    ///
    /// Returns 0.0 for an empty population or an empty tier.
    pub fn dispersion(&self, tier: Tier) -> f64 {
        let Some(first) = self.agents.first() else {
            return 0.0;
        };
        let num_goals = first.goals().tier(tier).len();

        let mut worst = 0.0f64;
        for goal_idx in 0..num_goals {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for agent in &self.agents {
                let value = agent.goals().tier(tier).value_at(goal_idx);
                min = min.min(value);
                max = max.max(value);
            }
            worst = worst.max(max - min);
        }
        worst
    }
}
