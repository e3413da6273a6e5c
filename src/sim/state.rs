//! Round state and scene handle types
//!
//! The round state is a plain value owned by the caller and passed by
//! reference into every controller handler.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Opaque handle to a node in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Opaque handle to a running move animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimationId(pub u32);

/// Opaque handle to a pending highlight revert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HighlightId(pub u32);

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing spawned yet
    Idle,
    /// A ship is flying toward the origin
    TargetInFlight,
    /// The ship reached the origin; waiting for restart
    RoundOver,
}

/// The ship currently in flight and the animation carrying it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTarget {
    pub node: NodeId,
    /// Only a completion for this animation may end the round
    pub animation: AnimationId,
}

/// Mutable state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// Current phase
    pub phase: GamePhase,
    /// Successful hits since the last round start
    pub score: u32,
    /// Seconds the next spawned ship takes to reach the origin
    pub duration: f32,
    /// Ship in flight, if any
    pub target: Option<ActiveTarget>,
    /// Where the most recent ship spawned
    pub last_spawn: Vec3,
    /// Completed rounds (reached RoundOver)
    pub rounds_played: u32,
}

impl RoundState {
    /// Fresh state before the first round
    pub fn new(initial_duration: f32) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            duration: initial_duration,
            target: None,
            last_spawn: Vec3::ZERO,
            rounds_played: 0,
        }
    }

    /// Number of ships currently owned by this round (0 or 1)
    pub fn active_targets(&self) -> usize {
        usize::from(self.target.is_some())
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase == GamePhase::TargetInFlight
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::RoundOver
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(crate::consts::INITIAL_DURATION)
    }
}

/// Seeded RNG used for spawn placement
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_new_round_state_is_idle() {
        let state = RoundState::default();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.duration, 5.0);
        assert_eq!(state.active_targets(), 0);
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let a: u32 = seeded_rng(7).random();
        let b: u32 = seeded_rng(7).random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_round_state_serde() {
        let mut state = RoundState::default();
        state.score = 4;
        state.target = Some(ActiveTarget {
            node: NodeId(3),
            animation: AnimationId(9),
        });
        let json = serde_json::to_string(&state).unwrap();
        let back: RoundState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 4);
        assert_eq!(back.target, state.target);
    }
}
