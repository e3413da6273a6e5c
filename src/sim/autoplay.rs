//! Demo player
//!
//! Taps each ship once its reaction time has passed since the ship appeared.
//! Flight time shrinks with every hit, so the demo always loses eventually.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::graph::{NodeKind, SceneGraph};
use super::state::{GamePhase, NodeId, RoundState, seeded_rng};
use crate::settings::DemoSettings;
use crate::ui::HudState;

/// Reaction-time driven tapper
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    settings: DemoSettings,
    rng: Pcg32,
    /// Ship currently being tracked
    tracking: Option<NodeId>,
    /// Seconds since `tracking` appeared
    elapsed: f32,
    /// Seconds this ship will take to react to
    reaction: f32,
    /// Tap a prop before going for the ship
    distracted: bool,
    /// Seconds spent on the game-over screen
    idle_for: f32,
}

impl AutoPlayer {
    pub fn new(settings: DemoSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: seeded_rng(seed),
            tracking: None,
            elapsed: 0.0,
            reaction: 0.0,
            distracted: false,
            idle_for: 0.0,
        }
    }

    /// Decide whether to tap this tick, and where
    pub fn update(
        &mut self,
        scene: &SceneGraph,
        hud: &HudState,
        round: &RoundState,
        dt: f32,
    ) -> Option<Vec2> {
        match round.phase {
            GamePhase::Idle => None,
            GamePhase::RoundOver => {
                self.tracking = None;
                self.idle_for += dt;
                if self.idle_for >= self.settings.restart_delay {
                    self.idle_for = 0.0;
                    Some(hud.restart_rect.center())
                } else {
                    None
                }
            }
            GamePhase::TargetInFlight => {
                self.idle_for = 0.0;
                let node = round.target?.node;
                if self.tracking != Some(node) {
                    self.track(node);
                }
                self.elapsed += dt;

                if self.distracted && self.elapsed >= self.reaction * 0.5 {
                    self.distracted = false;
                    if let Some(point) = self.prop_point(scene) {
                        return Some(point);
                    }
                }

                if self.elapsed < self.reaction {
                    return None;
                }
                let pos = scene.node(node)?.position;
                scene.camera().project(scene.viewport(), pos)
            }
        }
    }

    fn track(&mut self, node: NodeId) {
        let jitter = self.settings.reaction_jitter.abs();
        let offset = if jitter > 0.0 {
            self.rng.random_range(-jitter..=jitter)
        } else {
            0.0
        };
        self.tracking = Some(node);
        self.elapsed = 0.0;
        self.reaction = (self.settings.reaction_time + offset).max(0.05);
        self.distracted = self
            .rng
            .random_bool(self.settings.distraction_chance.clamp(0.0, 1.0));
    }

    /// Screen position of a random prop, if any is visible
    fn prop_point(&mut self, scene: &SceneGraph) -> Option<Vec2> {
        let props: Vec<_> = scene
            .nodes()
            .iter()
            .filter(|n| n.kind == NodeKind::Prop)
            .collect();
        if props.is_empty() {
            return None;
        }
        let pick = props[self.rng.random_range(0..props.len())];
        scene.camera().project(scene.viewport(), pick.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Tuning;
    use crate::sim::camera::{Camera, Viewport};
    use crate::sim::controller::GameController;
    use crate::sim::tick::{TickInput, tick};

    fn demo(reaction_time: f32) -> DemoSettings {
        DemoSettings {
            reaction_time,
            reaction_jitter: 0.0,
            distraction_chance: 0.0,
            restart_delay: 0.5,
            ..DemoSettings::default()
        }
    }

    fn play(reaction_time: f32, seconds: f32) -> (GameController<SceneGraph, HudState>, RoundState) {
        let viewport = Viewport::new(400.0, 800.0);
        let scene = SceneGraph::with_default_lighting(Camera::default(), viewport);
        let mut game = GameController::new(scene, HudState::new(&viewport), Tuning::default(), 5);
        let mut round = RoundState::default();
        let mut player = AutoPlayer::new(demo(reaction_time), 5);
        game.start_round(&mut round);

        let steps = (seconds / SIM_DT) as u32;
        for _ in 0..steps {
            let taps = player
                .update(&game.scene, &game.hud, &round, SIM_DT)
                .into_iter()
                .collect();
            tick(&mut game, &mut round, &TickInput { taps }, SIM_DT);
        }
        (game, round)
    }

    #[test]
    fn test_fast_player_scores() {
        let (_, round) = play(0.5, 3.0);
        assert!(round.score >= 4, "score was {}", round.score);
        assert_eq!(round.phase, GamePhase::TargetInFlight);
    }

    #[test]
    fn test_slow_player_loses_and_restarts() {
        // Never reacts before the first ship lands
        let (game, round) = play(6.0, 5.3);
        assert_eq!(round.phase, GamePhase::RoundOver);
        assert!(game.hud.restart_visible);

        let (game, round) = play(6.0, 5.8);
        assert_eq!(round.rounds_played, 1);
        assert_eq!(round.phase, GamePhase::TargetInFlight);
        assert_eq!(round.score, 0);
        assert!(!game.hud.restart_visible);
    }

    #[test]
    fn test_player_eventually_loses() {
        // Flight time drops below 0.9s after ~17 hits
        let (_, round) = play(0.9, 40.0);
        assert!(round.rounds_played >= 1);
    }
}
