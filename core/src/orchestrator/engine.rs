//! Orchestrator Engine
//!
//! Main round loop integrating the domain model and the alignment
//! algorithm:
//! - Configuration validation (fatal, before any round runs)
//! - Population construction (seeded random or predetermined values)
//! - Round execution (every agent aligns against every other agent)
//!
//! # Architecture
//!
//! ```text
//! For each round:
//!   For each agent A in population order:
//!     For each peer B in population order, B != A:
//!       align A toward B (A mutates, B is read-only)
//!     Capture A's post-step snapshot
//! ```
//!
//! Rounds are sequential by default: when a later agent reads an earlier
//! agent as peer, it sees values the earlier agent already updated this
//! round. [`RoundMode::Snapshot`] freezes every agent's state at round
//! start instead, giving a synchronous-gossip variant. Both orders are
//! deterministic.
//!
//! # Example
//!
//! ```rust
//! use goal_alignment_core::{Orchestrator, SimulationConfig};
//!
//! let config = SimulationConfig::default_population(3, 12345);
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//!
//! // Run simulation for 5 rounds
//! for _ in 0..5 {
//!     let result = orchestrator.round();
//!     println!("Round {}: {} pairings", result.round, result.num_pairings);
//! }
//! ```

use thiserror::Error;

use crate::alignment::{align_pair, PairStats};
use crate::models::agent::{Agent, AgentSnapshot};
use crate::models::goals::{GoalCatalog, GoalSet, GoalState, Tier};
use crate::models::state::SimulationState;
use crate::rng::SimRng;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// Everything needed to construct a population. The number of rounds is
/// not part of this: the driver owns it as a call count.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// RNG seed for deterministic runs
    pub rng_seed: u64,

    /// Agent identities, in population order
    pub agent_ids: Vec<String>,

    /// Goal names per tier, shared by every agent
    pub catalog: GoalCatalog,

    /// Same-tier alignment rate
    pub alpha: f64,

    /// Cross-tier leak rate
    pub beta: f64,

    /// How initial goal values are produced
    pub initial_values: InitialValues,

    /// Peer-visibility semantics within a round
    pub round_mode: RoundMode,
}

impl SimulationConfig {
    /// Convenience configuration: `num_agents` agents named `CAR_0`,
    /// `CAR_1`, ..., the default catalog, alpha 0.1, beta 0.05,
    /// random-uniform initial values, sequential rounds.
    ///
    /// # Example
    /// ```
    /// use goal_alignment_core::SimulationConfig;
    ///
    /// let config = SimulationConfig::default_population(3, 42);
    /// assert_eq!(config.agent_ids.len(), 3);
    /// assert_eq!(config.alpha, 0.1);
    /// ```
    pub fn default_population(num_agents: usize, rng_seed: u64) -> Self {
        Self {
            rng_seed,
            agent_ids: (0..num_agents).map(|i| format!("CAR_{}", i)).collect(),
            catalog: GoalCatalog::default(),
            alpha: 0.1,
            beta: 0.05,
            initial_values: InitialValues::RandomUniform,
            round_mode: RoundMode::Sequential,
        }
    }
}

/// How each agent's initial goal values are produced
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValues {
    /// Draw every value uniform in [0, 1) from the seeded RNG.
    ///
    /// This is a stand-in for real deployments, where values are
    /// predetermined per system rather than random.
    RandomUniform,

    /// Exact per-agent values, one seed per agent in population order.
    ///
    /// Used by tests and by deployments with known starting values.
    Predetermined(Vec<GoalStateSeed>),
}

/// Initial values for one agent, aligned index-for-index with the
/// catalog's tier name lists
#[derive(Debug, Clone, PartialEq)]
pub struct GoalStateSeed {
    /// High-tier values, same order as `GoalCatalog::high`
    pub high: Vec<f64>,

    /// Mid-tier values, same order as `GoalCatalog::mid`
    pub mid: Vec<f64>,

    /// Low-tier values, same order as `GoalCatalog::low`
    pub low: Vec<f64>,
}

impl GoalStateSeed {
    /// Seed with the same value at every goal on every tier
    pub fn uniform(catalog: &GoalCatalog, value: f64) -> Self {
        Self {
            high: vec![value; catalog.high.len()],
            mid: vec![value; catalog.mid.len()],
            low: vec![value; catalog.low.len()],
        }
    }

    fn tier_values(&self, tier: Tier) -> &[f64] {
        match tier {
            Tier::High => &self.high,
            Tier::Mid => &self.mid,
            Tier::Low => &self.low,
        }
    }
}

/// Peer-visibility semantics within one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundMode {
    /// Agents step in population order against live peer state. Later
    /// agents see earlier agents' already-updated values. This matches
    /// the original sequential-activation behavior.
    #[default]
    Sequential,

    /// All peer reads go against a copy of every agent's state taken at
    /// round start. True synchronous gossip: within a round, nobody sees
    /// anybody's updates.
    Snapshot,
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration validation errors
///
/// All of these are fatal and detected before any round runs. There are
/// no per-round recoverable errors: given a valid population the round
/// loop is total and deterministic.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("population must contain at least one agent")]
    EmptyPopulation,

    #[error("duplicate agent id: {0}")]
    DuplicateAgentId(String),

    #[error("{tier:?} tier has no goal names")]
    EmptyTier { tier: Tier },

    #[error("duplicate goal name in {tier:?} tier: {name}")]
    DuplicateGoalName { tier: Tier, name: String },

    #[error("alpha must be finite and non-negative, got {0}")]
    InvalidAlpha(f64),

    #[error("beta must be finite and non-negative, got {0}")]
    InvalidBeta(f64),

    #[error("predetermined values: expected {expected} agent seeds, got {actual}")]
    SeedCountMismatch { expected: usize, actual: usize },

    #[error(
        "predetermined values for agent {agent}: {tier:?} tier expects {expected} values, got {actual}"
    )]
    SeedLengthMismatch {
        agent: String,
        tier: Tier,
        expected: usize,
        actual: usize,
    },
}

// ============================================================================
// Round Results
// ============================================================================

/// Result of one full round
///
/// Carries the update-event totals for the round and a snapshot of each
/// agent captured immediately after that agent's step, so the driver can
/// report per-step state without reaching into the population mid-round.
#[derive(Debug, Clone)]
pub struct RoundResult {
    /// Round number (0-indexed)
    pub round: usize,

    /// Ordered (agent, peer) alignments performed: n * (n - 1)
    pub num_pairings: usize,

    /// Update-event totals summed over all pairings
    pub stats: PairStats,

    /// Per-agent snapshots, population order, each taken right after
    /// that agent finished aligning against all peers
    pub agent_snapshots: Vec<AgentSnapshot>,
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Owns the population and drives the round loop
pub struct Orchestrator {
    state: SimulationState,
    rng: SimRng,
    round_mode: RoundMode,
    current_round: usize,
}

impl Orchestrator {
    /// Create a new orchestrator from configuration
    ///
    /// Validates the configuration and builds the population.
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Population constructed, ready to run
    /// * `Err(ConfigError)` - Configuration validation failed
    ///
    /// # Example
    ///
    /// ```rust
    /// use goal_alignment_core::{
    ///     GoalCatalog, InitialValues, Orchestrator, RoundMode, SimulationConfig,
    /// };
    ///
    /// let config = SimulationConfig {
    ///     rng_seed: 12345,
    ///     agent_ids: vec!["CAR_0".to_string(), "CAR_1".to_string()],
    ///     catalog: GoalCatalog::default(),
    ///     alpha: 0.1,
    ///     beta: 0.05,
    ///     initial_values: InitialValues::RandomUniform,
    ///     round_mode: RoundMode::Sequential,
    /// };
    ///
    /// let orchestrator = Orchestrator::new(config).unwrap();
    /// assert_eq!(orchestrator.state().num_agents(), 2);
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::validate_config(&config)?;

        let mut rng = SimRng::new(config.rng_seed);

        // Build the population in id order. Under random initialization
        // each agent draws high, then mid, then low values, so the draw
        // sequence is fully determined by the seed and the catalog.
        let mut agents = Vec::with_capacity(config.agent_ids.len());
        for (idx, id) in config.agent_ids.iter().enumerate() {
            let goals = match &config.initial_values {
                InitialValues::RandomUniform => GoalState::new(
                    GoalSet::from_names(&config.catalog.high, |_| rng.next_f64()),
                    GoalSet::from_names(&config.catalog.mid, |_| rng.next_f64()),
                    GoalSet::from_names(&config.catalog.low, |_| rng.next_f64()),
                    config.alpha,
                    config.beta,
                ),
                InitialValues::Predetermined(seeds) => {
                    let seed = &seeds[idx];
                    GoalState::new(
                        seeded_tier(&config.catalog.high, &seed.high),
                        seeded_tier(&config.catalog.mid, &seed.mid),
                        seeded_tier(&config.catalog.low, &seed.low),
                        config.alpha,
                        config.beta,
                    )
                }
            };
            agents.push(Agent::new(id.clone(), goals));
        }

        Ok(Self {
            state: SimulationState::new(agents),
            rng,
            round_mode: config.round_mode,
            current_round: 0,
        })
    }

    /// Validate configuration
    fn validate_config(config: &SimulationConfig) -> Result<(), ConfigError> {
        if config.agent_ids.is_empty() {
            return Err(ConfigError::EmptyPopulation);
        }

        let mut ids = std::collections::HashSet::new();
        for id in &config.agent_ids {
            if !ids.insert(id) {
                return Err(ConfigError::DuplicateAgentId(id.clone()));
            }
        }

        for tier in [Tier::High, Tier::Mid, Tier::Low] {
            let names = config.catalog.tier_names(tier);
            if names.is_empty() {
                return Err(ConfigError::EmptyTier { tier });
            }
            let mut seen = std::collections::HashSet::new();
            for name in names {
                if !seen.insert(name) {
                    return Err(ConfigError::DuplicateGoalName {
                        tier,
                        name: name.clone(),
                    });
                }
            }
        }

        if !config.alpha.is_finite() || config.alpha < 0.0 {
            return Err(ConfigError::InvalidAlpha(config.alpha));
        }
        if !config.beta.is_finite() || config.beta < 0.0 {
            return Err(ConfigError::InvalidBeta(config.beta));
        }

        if let InitialValues::Predetermined(seeds) = &config.initial_values {
            if seeds.len() != config.agent_ids.len() {
                return Err(ConfigError::SeedCountMismatch {
                    expected: config.agent_ids.len(),
                    actual: seeds.len(),
                });
            }
            for (id, seed) in config.agent_ids.iter().zip(seeds) {
                for tier in [Tier::High, Tier::Mid, Tier::Low] {
                    let expected = config.catalog.tier_names(tier).len();
                    let actual = seed.tier_values(tier).len();
                    if actual != expected {
                        return Err(ConfigError::SeedLengthMismatch {
                            agent: id.clone(),
                            tier,
                            expected,
                            actual,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the number of completed rounds
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Get the configured round mode
    pub fn round_mode(&self) -> RoundMode {
        self.round_mode
    }

    /// Get reference to simulation state
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Get mutable reference to simulation state
    ///
    /// # Safety
    ///
    /// This is primarily for testing. Direct state mutation bypasses
    /// orchestrator invariants. Use with caution.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Get the RNG state, for reproducibility checks
    pub fn rng_state(&self) -> u64 {
        self.rng.state()
    }

    // ========================================================================
    // Round Loop Implementation
    // ========================================================================

    /// Execute one full round
    ///
    /// Every agent, in population order, aligns against every other
    /// agent in population order. Only the stepping agent mutates; each
    /// peer is read as it currently stands (sequential mode) or as it
    /// stood at round start (snapshot mode).
    pub fn round(&mut self) -> RoundResult {
        let round = self.current_round;
        let result = match self.round_mode {
            RoundMode::Sequential => self.run_round_sequential(round),
            RoundMode::Snapshot => self.run_round_snapshot(round),
        };
        self.current_round += 1;
        result
    }

    fn run_round_sequential(&mut self, round: usize) -> RoundResult {
        let num_agents = self.state.num_agents();
        let mut stats = PairStats::default();
        let mut num_pairings = 0;
        let mut agent_snapshots = Vec::with_capacity(num_agents);

        for agent_idx in 0..num_agents {
            for peer_idx in 0..num_agents {
                if peer_idx == agent_idx {
                    continue;
                }
                // Peer state as of now, which for earlier agents already
                // includes this round's updates.
                let peer = self.state.agents()[peer_idx].goals().clone();
                stats += align_pair(self.state.agent_at_mut(agent_idx).goals_mut(), &peer);
                num_pairings += 1;
            }
            agent_snapshots.push(self.state.agents()[agent_idx].snapshot());
        }

        RoundResult {
            round,
            num_pairings,
            stats,
            agent_snapshots,
        }
    }

    fn run_round_snapshot(&mut self, round: usize) -> RoundResult {
        let num_agents = self.state.num_agents();

        // Freeze everyone's state as of round start; all peer reads go
        // against this copy.
        let frozen: Vec<GoalState> = self
            .state
            .agents()
            .iter()
            .map(|agent| agent.goals().clone())
            .collect();

        let mut stats = PairStats::default();
        let mut num_pairings = 0;
        let mut agent_snapshots = Vec::with_capacity(num_agents);

        for agent_idx in 0..num_agents {
            for peer_idx in 0..num_agents {
                if peer_idx == agent_idx {
                    continue;
                }
                stats += align_pair(
                    self.state.agent_at_mut(agent_idx).goals_mut(),
                    &frozen[peer_idx],
                );
                num_pairings += 1;
            }
            agent_snapshots.push(self.state.agents()[agent_idx].snapshot());
        }

        RoundResult {
            round,
            num_pairings,
            stats,
            agent_snapshots,
        }
    }
}

/// Build a tier from catalog names and seed values of equal length
fn seeded_tier(names: &[String], values: &[f64]) -> GoalSet {
    GoalSet::from_values(
        names
            .iter()
            .cloned()
            .zip(values.iter().copied())
            .collect::<Vec<_>>(),
    )
}
