//! Goal hierarchy model
//!
//! An agent's goals live on three tiers, coarse to fine:
//! high (mission-level values), mid (tactical objectives), low
//! (actuation-level behaviors). Each tier is an insertion-ordered set of
//! named scalar values.
//!
//! # Critical Invariants
//!
//! 1. Iteration order of a tier is its construction order. The alignment
//!    algorithm's leak step compounds sequentially, so hash-order
//!    iteration would make runs irreproducible.
//! 2. The set of goal names at each tier is fixed at agent creation and
//!    identical across all agents in a population.
//! 3. Values are conceptually in [0, 1] but never clamped.

use serde::{Deserialize, Serialize};

/// One of the three goal abstraction levels, ordered coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// Mission-level values (e.g. "Safety", "Efficiency")
    High,
    /// Tactical objectives (e.g. "TrafficManagement", "RouteOptimization")
    Mid,
    /// Actuation-level behaviors (e.g. "Acceleration", "Braking")
    Low,
}

/// An insertion-ordered collection of named scalar goal values
///
/// Backed by a `Vec` rather than a hash map so that iteration order is
/// exactly construction order. The alignment algorithm applies its leak
/// nudges sequentially and each nudge compounds on the previous one, so
/// the order goals are visited in is observable behavior.
///
/// # Example
/// ```
/// use goal_alignment_core::GoalSet;
///
/// let high = GoalSet::from_values([("Safety", 0.2), ("Efficiency", 0.9)]);
/// assert_eq!(high.len(), 2);
/// assert_eq!(high.get("Safety"), Some(0.2));
/// assert_eq!(high.name_at(1), "Efficiency");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSet {
    /// (name, value) pairs in insertion order
    entries: Vec<(String, f64)>,
}

impl GoalSet {
    /// Create a goal set from explicit (name, value) pairs
    ///
    /// Order of the input is preserved as the iteration order.
    ///
    /// # Example
    /// ```
    /// use goal_alignment_core::GoalSet;
    ///
    /// let mid = GoalSet::from_values([("TrafficManagement", 0.5)]);
    /// assert_eq!(mid.get("TrafficManagement"), Some(0.5));
    /// ```
    pub fn from_values<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Create a goal set from a name list and a per-name initializer
    ///
    /// The initializer is called once per name, in order. This is how a
    /// population is seeded: the orchestrator passes either a closure over
    /// the seeded RNG (random-uniform start) or a closure over
    /// predetermined values.
    ///
    /// # Example
    /// ```
    /// use goal_alignment_core::GoalSet;
    ///
    /// let names = vec!["Acceleration".to_string(), "Braking".to_string()];
    /// let low = GoalSet::from_names(&names, |_| 0.5);
    /// assert_eq!(low.get("Braking"), Some(0.5));
    /// ```
    pub fn from_names<F>(names: &[String], mut init: F) -> Self
    where
        F: FnMut(&str) -> f64,
    {
        Self {
            entries: names
                .iter()
                .map(|name| (name.clone(), init(name)))
                .collect(),
        }
    }

    /// Number of goals in this set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this set contains no goals
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by goal name
    ///
    /// Linear scan; tiers are small (a handful of goals).
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Goal name at a position in insertion order
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn name_at(&self, index: usize) -> &str {
        &self.entries[index].0
    }

    /// Goal value at a position in insertion order
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn value_at(&self, index: usize) -> f64 {
        self.entries[index].1
    }

    /// Overwrite the value at a position. The engine's only mutation path.
    pub(crate) fn set_value(&mut self, index: usize, value: f64) {
        self.entries[index].1 = value;
    }

    /// Iterate (name, value) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Iterate goal names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate goal values in insertion order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }
}

/// Per-agent goal values across all three tiers plus alignment rates
///
/// Holds state only. All mutation beyond construction happens in the
/// alignment engine; this type exposes the tiers and the two rate
/// constants and nothing else.
///
/// # Example
/// ```
/// use goal_alignment_core::{GoalSet, GoalState};
///
/// let state = GoalState::new(
///     GoalSet::from_values([("Safety", 0.2)]),
///     GoalSet::from_values([("TrafficManagement", 0.5)]),
///     GoalSet::from_values([("Braking", 0.8)]),
///     0.1,
///     0.05,
/// );
/// assert_eq!(state.alpha(), 0.1);
/// assert_eq!(state.high().get("Safety"), Some(0.2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalState {
    /// Mission-level goal values
    high: GoalSet,

    /// Tactical goal values
    mid: GoalSet,

    /// Actuation-level goal values
    low: GoalSet,

    /// Same-tier alignment rate (peer-to-peer convergence speed)
    alpha: f64,

    /// Cross-tier leak rate (how strongly a finer tier's adjustment
    /// nudges the next-coarser tier)
    beta: f64,
}

impl GoalState {
    /// Create a goal state from three tiers and the two rate constants
    ///
    /// # Panics
    /// Panics if `alpha` or `beta` is negative or not finite. Population
    /// construction validates rates up front and reports a
    /// `ConfigError` instead; this assert is the last line of defense for
    /// states built by hand.
    pub fn new(high: GoalSet, mid: GoalSet, low: GoalSet, alpha: f64, beta: f64) -> Self {
        assert!(
            alpha.is_finite() && alpha >= 0.0,
            "alpha must be finite and non-negative"
        );
        assert!(
            beta.is_finite() && beta >= 0.0,
            "beta must be finite and non-negative"
        );
        Self {
            high,
            mid,
            low,
            alpha,
            beta,
        }
    }

    /// High-tier goal values
    pub fn high(&self) -> &GoalSet {
        &self.high
    }

    /// Mid-tier goal values
    pub fn mid(&self) -> &GoalSet {
        &self.mid
    }

    /// Low-tier goal values
    pub fn low(&self) -> &GoalSet {
        &self.low
    }

    /// Goal values for the given tier
    pub fn tier(&self, tier: Tier) -> &GoalSet {
        match tier {
            Tier::High => &self.high,
            Tier::Mid => &self.mid,
            Tier::Low => &self.low,
        }
    }

    /// Same-tier alignment rate
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Cross-tier leak rate
    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub(crate) fn high_mut(&mut self) -> &mut GoalSet {
        &mut self.high
    }

    pub(crate) fn mid_mut(&mut self) -> &mut GoalSet {
        &mut self.mid
    }

    pub(crate) fn low_mut(&mut self) -> &mut GoalSet {
        &mut self.low
    }
}

/// The goal-name lists shared by every agent in a population
///
/// Alignment pairs values by goal name, so the catalog is fixed at
/// population construction and identical for all agents. A mismatch is a
/// configuration error, never a per-round condition.
///
/// # Example
/// ```
/// use goal_alignment_core::GoalCatalog;
///
/// let catalog = GoalCatalog::default();
/// assert_eq!(catalog.high, vec!["Safety", "Efficiency"]);
/// assert_eq!(catalog.low.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCatalog {
    /// High-tier goal names
    pub high: Vec<String>,

    /// Mid-tier goal names
    pub mid: Vec<String>,

    /// Low-tier goal names
    pub low: Vec<String>,
}

impl GoalCatalog {
    /// Create a catalog from three tier name lists
    pub fn new(high: Vec<String>, mid: Vec<String>, low: Vec<String>) -> Self {
        Self { high, mid, low }
    }

    /// Goal names for the given tier
    pub fn tier_names(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::High => &self.high,
            Tier::Mid => &self.mid,
            Tier::Low => &self.low,
        }
    }
}

impl Default for GoalCatalog {
    /// The autonomous-driving catalog the simulator was built around
    fn default() -> Self {
        Self {
            high: vec!["Safety".to_string(), "Efficiency".to_string()],
            mid: vec![
                "TrafficManagement".to_string(),
                "RouteOptimization".to_string(),
            ],
            low: vec!["Acceleration".to_string(), "Braking".to_string()],
        }
    }
}
