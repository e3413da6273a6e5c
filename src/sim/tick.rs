//! Fixed timestep simulation tick
//!
//! Each tick first resolves this frame's taps, then advances the scene and
//! dispatches its events. Taps therefore win over an arrival landing in the
//! same frame.

use glam::Vec2;

use super::controller::{GameController, TapOutcome};
use super::scene::{Scene, SceneEvent};
use super::state::{GamePhase, RoundState};
use crate::consts::*;
use crate::ui::Hud;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Taps in view space, oldest first
    pub taps: Vec<Vec2>,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub hits: u32,
    pub highlights: u32,
    pub restarted: bool,
    /// The round ended during this tick
    pub round_over: bool,
}

/// Advance the game by one fixed timestep
pub fn tick<S: Scene, H: Hud>(
    game: &mut GameController<S, H>,
    round: &mut RoundState,
    input: &TickInput,
    dt: f32,
) -> TickReport {
    let mut report = TickReport::default();

    for &tap in &input.taps {
        if game.hud.restart_hit(tap) {
            game.on_restart(round);
            report.restarted = true;
            continue;
        }
        match game.on_tap(round, tap) {
            TapOutcome::Hit { .. } => report.hits += 1,
            TapOutcome::Highlighted(_) => report.highlights += 1,
            TapOutcome::Ignored => {}
        }
    }

    let was_over = round.phase == GamePhase::RoundOver;
    let mut events: Vec<SceneEvent> = Vec::new();
    game.scene.advance(dt, &mut events);
    for event in events {
        game.handle_event(round, event);
    }
    report.round_over = !was_over && round.phase == GamePhase::RoundOver;

    report
}

/// Frame-time accumulator that feeds whole `SIM_DT` steps
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add elapsed wall time and return how many ticks to run (capped)
    pub fn push(&mut self, frame_dt: f32) -> u32 {
        // Clamp long frames (debugger, suspended window)
        self.accumulator += frame_dt.clamp(0.0, 0.25);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Drop whatever the cap left behind so we don't spiral
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT * 0.5);
        }
        steps
    }
}
