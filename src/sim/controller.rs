//! Round lifecycle
//!
//! `GameController` owns the collaborators and the spawn RNG; the round
//! itself lives in a `RoundState` the caller passes to each handler.
//!
//! Flow: `Idle -> start_round -> TargetInFlight -> (hit) -> TargetInFlight ...
//! -> (ship arrives) -> RoundOver -> restart -> TargetInFlight`.

use glam::{Vec2, Vec3};
use rand_pcg::Pcg32;

use super::scene::{Scene, SceneEvent};
use super::spawn::random_spawn;
use super::state::{ActiveTarget, AnimationId, GamePhase, NodeId, RoundState, seeded_rng};
use crate::settings::Tuning;
use crate::ui::{Hud, game_over_text, score_text};

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Nothing under the tap, or nothing to do
    Ignored,
    /// The ship was hit; carries the new score
    Hit { score: u32 },
    /// Some other node was flashed
    Highlighted(NodeId),
}

/// Drives one game: spawns ships, scores hits, ends rounds
pub struct GameController<S: Scene, H: Hud> {
    pub scene: S,
    pub hud: H,
    tuning: Tuning,
    rng: Pcg32,
}

impl<S: Scene, H: Hud> GameController<S, H> {
    pub fn new(scene: S, hud: H, tuning: Tuning, seed: u64) -> Self {
        Self {
            scene,
            hud,
            tuning,
            rng: seeded_rng(seed),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Reset score and duration, then launch the first ship
    pub fn start_round(&mut self, round: &mut RoundState) {
        // Never leave a second ship behind if called mid-flight
        if let Some(old) = round.target.take() {
            self.scene.cancel_animation(old.animation);
            self.scene.remove_node(old.node);
        }

        round.score = 0;
        round.duration = self.tuning.initial_duration;
        self.hud.set_restart_visible(false);
        self.hud.set_status(&score_text(round.score));

        self.launch_target(round);
        round.phase = GamePhase::TargetInFlight;
        log::info!(
            "Round started: duration {:.2}s, ship at {:?}",
            round.duration,
            round.last_spawn
        );
    }

    /// Spawn a ship and send it toward the origin over `round.duration`
    fn launch_target(&mut self, round: &mut RoundState) {
        let spawn = random_spawn(&mut self.rng, &self.tuning);
        let node = self.scene.spawn_target(spawn.position, spawn.look_at);
        let animation = self.scene.animate_move(node, Vec3::ZERO, round.duration);
        round.target = Some(ActiveTarget { node, animation });
        round.last_spawn = spawn.position;
    }

    /// The ship reached the origin. Completions for anything but the pending
    /// animation are stale and ignored.
    pub fn on_animation_complete(&mut self, round: &mut RoundState, animation: AnimationId) {
        let Some(active) = round.target else {
            log::debug!("Completion {:?} with no ship in flight; ignored", animation);
            return;
        };
        if active.animation != animation || round.phase != GamePhase::TargetInFlight {
            log::debug!("Stale completion {:?}; ignored", animation);
            return;
        }

        self.scene.remove_node(active.node);
        round.target = None;
        round.phase = GamePhase::RoundOver;
        round.rounds_played += 1;

        self.hud.set_restart_visible(true);
        self.hud.set_status(&game_over_text(round.score));
        log::info!("Game over: score {}", round.score);
    }

    /// Resolve a tap in view space
    pub fn on_tap(&mut self, round: &mut RoundState, point: Vec2) -> TapOutcome {
        let Some(hit) = self.scene.hit_test(point) else {
            return TapOutcome::Ignored;
        };

        let current = round.target;
        match current {
            Some(active)
                if hit.is_target
                    && hit.node == active.node
                    && round.phase == GamePhase::TargetInFlight =>
            {
                // Cancel before anything else so the completion can't land
                self.scene.cancel_animation(active.animation);
                self.scene.remove_node(active.node);
                round.target = None;

                round.duration = self.tuning.next_duration(round.duration);
                round.score += self.tuning.score_per_hit;
                self.hud.set_status(&score_text(round.score));

                self.launch_target(round);
                log::debug!(
                    "Hit! score {}, next duration {:.3}s",
                    round.score,
                    round.duration
                );
                TapOutcome::Hit { score: round.score }
            }
            _ => {
                self.scene.highlight(
                    hit.node,
                    self.tuning.highlight_color,
                    self.tuning.highlight_duration,
                );
                TapOutcome::Highlighted(hit.node)
            }
        }
    }

    /// Restart button pressed
    pub fn on_restart(&mut self, round: &mut RoundState) {
        if round.phase == GamePhase::TargetInFlight {
            log::debug!("Restart ignored while a ship is in flight");
            return;
        }
        self.hud.set_restart_visible(false);
        self.start_round(round);
    }

    /// Route a scene notification
    pub fn handle_event(&mut self, round: &mut RoundState, event: SceneEvent) {
        match event {
            SceneEvent::MoveCompleted { animation, .. } => {
                self.on_animation_complete(round, animation);
            }
            SceneEvent::HighlightReverted { node, .. } => {
                log::trace!("Highlight on {:?} reverted", node);
            }
        }
    }
}
