//! Ship Tap - a 3D reaction game
//!
//! Core modules:
//! - `sim`: Round state, game controller, headless scene engine, tick driver
//! - `ui`: HUD surface (restart button + status label)
//! - `input`: Tap collection in view space
//! - `settings`: Tuning and runtime configuration
//! - `highscores`: Best completed rounds

pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScores;
pub use settings::{Settings, Tuning};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz is plenty for a tap game)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Seconds a freshly spawned ship takes to reach the origin
    pub const INITIAL_DURATION: f32 = 5.0;
    /// Duration multiplier applied after every hit
    pub const DURATION_SHRINK: f32 = 0.9;
    /// Points per hit
    pub const SCORE_PER_HIT: u32 = 1;

    /// Spawn x/y are drawn from [-SPAWN_HALF_EXTENT, SPAWN_HALF_EXTENT]
    pub const SPAWN_HALF_EXTENT: f32 = 25.0;
    /// Spawn depth (fixed z, in front of the camera)
    pub const SPAWN_DEPTH: f32 = -105.0;
    /// Pick radius of the ship's bounding sphere
    pub const TARGET_RADIUS: f32 = 4.0;

    /// Highlight on/off time for non-target taps
    pub const HIGHLIGHT_DURATION: f32 = 0.5;

    /// Restart button size in view points
    pub const RESTART_BUTTON_WIDTH: f32 = 200.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 100.0;

    /// Default viewport (view-space points)
    pub const VIEWPORT_WIDTH: f32 = 390.0;
    pub const VIEWPORT_HEIGHT: f32 = 844.0;

    /// Camera defaults
    pub const CAMERA_FOV_Y_DEGREES: f32 = 60.0;
    pub const CAMERA_NEAR: f32 = 1.0;
    pub const CAMERA_FAR: f32 = 300.0;
}

/// Linear RGB colour used for emission/lighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const DARK_GRAY: Color = Color::rgb(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Rotation that points a node's forward axis (-Z) from `from` toward `target`.
///
/// Returns identity when the two points coincide.
pub fn look_rotation(from: Vec3, target: Vec3) -> Quat {
    let dir = (target - from).normalize_or_zero();
    if dir == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::NEG_Z, dir)
}

/// Forward axis of a rotated node
#[inline]
pub fn forward(rotation: Quat) -> Vec3 {
    rotation * Vec3::NEG_Z
}
