//! Agent model
//!
//! An agent is an identity wrapped around one [`GoalState`]. Agents are
//! created once at population setup, mutated every round by the alignment
//! engine, and never destroyed during a run.

use serde::{Deserialize, Serialize};

use crate::models::goals::{GoalSet, GoalState};

/// One autonomous agent in the population
///
/// # Example
/// ```
/// use goal_alignment_core::{Agent, GoalSet, GoalState};
///
/// let goals = GoalState::new(
///     GoalSet::from_values([("Safety", 0.2)]),
///     GoalSet::from_values([("TrafficManagement", 0.5)]),
///     GoalSet::from_values([("Braking", 0.8)]),
///     0.1,
///     0.05,
/// );
/// let agent = Agent::new("CAR_0".to_string(), goals);
/// assert_eq!(agent.id(), "CAR_0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier (e.g. "CAR_0")
    id: String,

    /// The agent's goal values and alignment rates
    goals: GoalState,
}

impl Agent {
    /// Create a new agent
    pub fn new(id: String, goals: GoalState) -> Self {
        Self { id, goals }
    }

    /// Get agent ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get read-only access to the agent's goal state
    pub fn goals(&self) -> &GoalState {
        &self.goals
    }

    /// Get mutable access to the agent's goal state
    ///
    /// # Safety
    ///
    /// Within a round only the stepping agent's state may be mutated.
    /// The orchestrator upholds this; direct mutation is primarily for
    /// tests that drive the alignment engine by hand.
    pub fn goals_mut(&mut self) -> &mut GoalState {
        &mut self.goals
    }

    /// Read-only snapshot of the agent's three tiers
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot::from(self)
    }
}

/// Read-only copy of an agent's goal values at a point in time
///
/// What the driver logs after each agent's step. Tier contents are
/// (name, value) pairs in the tier's iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: String,
    pub high: Vec<(String, f64)>,
    pub mid: Vec<(String, f64)>,
    pub low: Vec<(String, f64)>,
}

impl From<&Agent> for AgentSnapshot {
    fn from(agent: &Agent) -> Self {
        let collect =
            |set: &GoalSet| set.iter().map(|(n, v)| (n.to_string(), v)).collect();
        AgentSnapshot {
            id: agent.id().to_string(),
            high: collect(agent.goals().high()),
            mid: collect(agent.goals().mid()),
            low: collect(agent.goals().low()),
        }
    }
}
