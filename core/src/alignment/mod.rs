//! Pairwise goal alignment with cross-tier leak
//!
//! The system's only nontrivial algorithm. One call moves the stepping
//! agent's values a fraction of the way toward a peer's values, tier by
//! tier, and leaks each finer-tier adjustment one tier upward:
//!
//! ```text
//! 1. high:  h += alpha * (peer_h - h)            for each high goal
//! 2. mid:   m += alpha * (peer_m - m)            for each mid goal,
//!           then h2 += beta * (m - h2)           for every high goal h2
//! 3. low:   l += alpha * (peer_l - l)            for each low goal,
//!           then m2 += beta * (l - m2)           for every mid goal m2
//! ```
//!
//! The asymmetry and ordering are deliberate and observable:
//!
//! - Only the stepping side mutates; the peer is read-only.
//! - The leak is an all-pairs cross product, not a name-matched pairing.
//!   M mid goals and H high goals produce M×H sequential nudges on the
//!   high tier, in mid-goal-major order, each compounding on the last.
//! - Each leak uses the just-updated finer value from the same iteration.
//! - The leak travels exactly one tier up per call. Low-tier changes
//!   reach the high tier only through the mid tier in a later call,
//!   never within the same call.
//! - No normalization by goal count: more goals at a tier means more
//!   leak into the tier above. Values are not clamped to [0, 1].

use crate::models::goals::{GoalSet, GoalState};

/// Counts of the update events one [`align_pair`] call applied
///
/// Same-tier EMA updates number one per goal. Leak nudges number
/// mid×high and low×mid respectively; the counts make the compounding
/// volume visible to callers and tests without instrumenting the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairStats {
    /// Same-tier updates applied to the high tier
    pub high_updates: usize,

    /// Same-tier updates applied to the mid tier
    pub mid_updates: usize,

    /// Same-tier updates applied to the low tier
    pub low_updates: usize,

    /// Leak nudges applied to the high tier by the mid pass (M×H)
    pub mid_to_high_nudges: usize,

    /// Leak nudges applied to the mid tier by the low pass (L×M)
    pub low_to_mid_nudges: usize,
}

impl PairStats {
    /// Total update events across all tiers
    pub fn total(&self) -> usize {
        self.high_updates
            + self.mid_updates
            + self.low_updates
            + self.mid_to_high_nudges
            + self.low_to_mid_nudges
    }
}

impl std::ops::AddAssign for PairStats {
    fn add_assign(&mut self, other: Self) {
        self.high_updates += other.high_updates;
        self.mid_updates += other.mid_updates;
        self.low_updates += other.low_updates;
        self.mid_to_high_nudges += other.mid_to_high_nudges;
        self.low_to_mid_nudges += other.low_to_mid_nudges;
    }
}

/// Align `state` toward `peer` across all three tiers
///
/// Mutates `state` in place; `peer` is read-only and unchanged. Both
/// sides must carry the same goal names in the same order at every tier.
/// Population construction guarantees this; hand-built states that
/// violate it panic here rather than silently mis-pairing.
///
/// # Example
/// ```
/// use goal_alignment_core::{align_pair, GoalSet, GoalState};
///
/// let mut state = GoalState::new(
///     GoalSet::from_values([("Safety", 0.2)]),
///     GoalSet::from_values([("TrafficManagement", 0.0)]),
///     GoalSet::from_values([("Braking", 0.5)]),
///     0.1,
///     0.05,
/// );
/// let peer = GoalState::new(
///     GoalSet::from_values([("Safety", 0.8)]),
///     GoalSet::from_values([("TrafficManagement", 1.0)]),
///     GoalSet::from_values([("Braking", 0.5)]),
///     0.1,
///     0.05,
/// );
///
/// let stats = align_pair(&mut state, &peer);
/// // high: 0.2 + 0.1 * (0.8 - 0.2) = 0.26, then the updated mid value
/// // (0.0 + 0.1 * 1.0 = 0.1) leaks in: 0.26 + 0.05 * (0.1 - 0.26) = 0.252
/// assert!((state.high().get("Safety").unwrap() - 0.252).abs() < 1e-12);
/// assert_eq!(stats.mid_to_high_nudges, 1);
/// ```
pub fn align_pair(state: &mut GoalState, peer: &GoalState) -> PairStats {
    let alpha = state.alpha();
    let beta = state.beta();
    let mut stats = PairStats::default();

    // 1. High tier: plain same-tier convergence. Top of the hierarchy,
    //    nothing above it to leak into.
    stats.high_updates = align_tier(state.high_mut(), peer.high(), alpha, "high");

    // 2. Mid tier, leaking upward into high.
    check_names(state.mid(), peer.mid(), "mid");
    for mid_idx in 0..state.mid().len() {
        let current = state.mid().value_at(mid_idx);
        let target = peer.mid().value_at(mid_idx);
        state
            .mid_mut()
            .set_value(mid_idx, current + alpha * (target - current));
        stats.mid_updates += 1;

        // The just-updated mid value nudges every high goal.
        let leaked = state.mid().value_at(mid_idx);
        for high_idx in 0..state.high().len() {
            let h = state.high().value_at(high_idx);
            state
                .high_mut()
                .set_value(high_idx, h + beta * (leaked - h));
            stats.mid_to_high_nudges += 1;
        }
    }

    // 3. Low tier, leaking upward into mid. Runs after the mid pass, so
    //    these nudges compound on mid values that already moved. The
    //    leak stops at mid: no second hop into high this call.
    check_names(state.low(), peer.low(), "low");
    for low_idx in 0..state.low().len() {
        let current = state.low().value_at(low_idx);
        let target = peer.low().value_at(low_idx);
        state
            .low_mut()
            .set_value(low_idx, current + alpha * (target - current));
        stats.low_updates += 1;

        let leaked = state.low().value_at(low_idx);
        for mid_idx in 0..state.mid().len() {
            let m = state.mid().value_at(mid_idx);
            state
                .mid_mut()
                .set_value(mid_idx, m + beta * (leaked - m));
            stats.low_to_mid_nudges += 1;
        }
    }

    stats
}

/// Same-tier exponential-moving-average step, one tier
///
/// Moves each of `tier`'s values a fraction `rate` of the gap toward the
/// peer's value for the same goal. Returns the number of updates applied.
fn align_tier(tier: &mut GoalSet, peer: &GoalSet, rate: f64, label: &str) -> usize {
    check_names(tier, peer, label);
    for idx in 0..tier.len() {
        let current = tier.value_at(idx);
        let target = peer.value_at(idx);
        tier.set_value(idx, current + rate * (target - current));
    }
    tier.len()
}

fn check_names(tier: &GoalSet, peer: &GoalSet, label: &str) {
    assert!(
        tier.len() == peer.len(),
        "{} tier goal count mismatch: {} vs {}",
        label,
        tier.len(),
        peer.len()
    );
    for idx in 0..tier.len() {
        assert!(
            tier.name_at(idx) == peer.name_at(idx),
            "{} tier goal name mismatch at index {}: {} vs {}",
            label,
            idx,
            tier.name_at(idx),
            peer.name_at(idx)
        );
    }
}
