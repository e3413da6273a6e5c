//! HUD surface: restart button and status label

use glam::Vec2;

use crate::consts::{RESTART_BUTTON_HEIGHT, RESTART_BUTTON_WIDTH};
use crate::sim::camera::Viewport;

/// Label text while a round is running
pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

/// Label text once the ship got through
pub fn game_over_text(score: u32) -> String {
    format!("Game Over\nScore: {score}")
}

/// UI widgets the controller drives
pub trait Hud {
    fn set_restart_visible(&mut self, visible: bool);
    fn set_status(&mut self, text: &str);
    /// Whether a tap lands on the restart button while it is shown
    fn restart_hit(&self, point: Vec2) -> bool;
}

/// Axis-aligned rectangle in view space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of `size` centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Retained HUD state, read by whatever draws the overlay
#[derive(Debug, Clone)]
pub struct HudState {
    pub restart_visible: bool,
    pub status: String,
    /// Restart button bounds, centred in the viewport
    pub restart_rect: Rect,
}

impl HudState {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            restart_visible: false,
            status: score_text(0),
            restart_rect: Rect::centered(
                viewport.center(),
                Vec2::new(RESTART_BUTTON_WIDTH, RESTART_BUTTON_HEIGHT),
            ),
        }
    }
}

impl Hud for HudState {
    fn set_restart_visible(&mut self, visible: bool) {
        self.restart_visible = visible;
    }

    fn set_status(&mut self, text: &str) {
        self.status.clear();
        self.status.push_str(text);
    }

    fn restart_hit(&self, point: Vec2) -> bool {
        self.restart_visible && self.restart_rect.contains(point)
    }
}
