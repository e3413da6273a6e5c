//! Spawn placement for ships

use glam::Vec3;
use rand::Rng;

use crate::settings::Tuning;

/// Where a ship appears and how it is oriented
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    /// Point the ship faces (always the origin)
    pub look_at: Vec3,
}

/// Draw a spawn point: x/y uniform in the tuning's square, z fixed.
pub fn random_spawn<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> SpawnPoint {
    let half = tuning.spawn_half_extent.abs();
    let x = rng.random_range(-half..=half);
    let y = rng.random_range(-half..=half);
    SpawnPoint {
        position: Vec3::new(x, y, tuning.spawn_depth),
        look_at: Vec3::ZERO,
    }
}
