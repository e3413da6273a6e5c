//! Headless demo session
//!
//! Wires the scene graph, HUD, controller and demo player together and runs
//! fixed-step frames until the requested number of rounds has ended.

use glam::Vec3;
use rand::Rng;

use super::autoplay::AutoPlayer;
use super::controller::GameController;
use super::graph::SceneGraph;
use super::state::{RoundState, seeded_rng};
use super::tick::{FixedStep, TickInput, tick};
use crate::consts::SIM_DT;
use crate::highscores::{HighScores, now_millis};
use crate::input::InputState;
use crate::settings::Settings;
use crate::ui::HudState;

/// Simulated display refresh
pub const FRAME_DT: f32 = 1.0 / 50.0;
/// Give up after this much simulated time
pub const MAX_SIM_SECONDS: f32 = 600.0;

/// Result of a demo session
#[derive(Debug)]
pub struct DemoSummary {
    /// Final score of every finished round, in order
    pub scores: Vec<u32>,
    /// Last HUD status line
    pub status: String,
    /// Whether any round was started at all
    pub played: bool,
}

/// Scatter pickable scenery between the camera and the spawn plane
fn place_props(scene: &mut SceneGraph, seed: u64, count: u32) {
    let mut rng = seeded_rng(seed);
    for _ in 0..count {
        let pos = Vec3::new(
            rng.random_range(-15.0..=15.0),
            rng.random_range(-15.0..=15.0),
            rng.random_range(-60.0..=-30.0),
        );
        scene.add_prop(pos, 1.5);
    }
}

/// Play `settings.demo.rounds` rounds with the demo player, recording each
/// final score in `highscores`. Zero rounds spawns nothing.
pub fn run_demo(settings: &Settings, seed: u64, highscores: &mut HighScores) -> DemoSummary {
    let mut scene = SceneGraph::with_default_lighting(settings.camera.clone(), settings.viewport);
    scene.set_target_radius(settings.tuning.target_radius);
    place_props(&mut scene, seed.wrapping_add(1), settings.demo.props);

    let hud = HudState::new(&settings.viewport);
    let mut game = GameController::new(scene, hud, settings.tuning.clone(), seed);
    let mut round = RoundState::new(settings.tuning.initial_duration);

    if settings.demo.rounds == 0 {
        log::info!("Demo rounds set to 0; nothing to play");
        return DemoSummary {
            scores: Vec::new(),
            status: game.hud.status,
            played: false,
        };
    }

    let mut player = AutoPlayer::new(settings.demo.clone(), seed.wrapping_add(2));
    let mut input = InputState::default();
    let mut stepper = FixedStep::new();
    game.start_round(&mut round);

    let mut scores = Vec::new();
    let mut sim_time = 0.0f32;
    let mut ticks: u64 = 0;
    'frames: while sim_time < MAX_SIM_SECONDS {
        for _ in 0..stepper.push(FRAME_DT) {
            if let Some(tap) = player.update(&game.scene, &game.hud, &round, SIM_DT) {
                input.push_tap(tap);
            }
            let taps = input.drain_taps();
            let report = tick(&mut game, &mut round, &TickInput { taps }, SIM_DT);
            sim_time += SIM_DT;
            ticks += 1;

            if settings.show_statistics && ticks % 60 == 0 {
                let stats = game.scene.stats();
                log::debug!(
                    "t={:.1}s nodes={} ships={} animations={} highlights={}",
                    sim_time,
                    stats.nodes,
                    stats.targets,
                    stats.animations,
                    stats.highlights
                );
            }

            if report.round_over {
                scores.push(round.score);
                if let Some(rank) = highscores.add_score(round.score, round.duration, now_millis()) {
                    log::info!("New high score #{}: {}", rank, round.score);
                }
                if scores.len() as u32 >= settings.demo.rounds {
                    break 'frames;
                }
            }
        }
    }

    DemoSummary {
        scores,
        status: game.hud.status,
        played: true,
    }
}
