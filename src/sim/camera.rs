//! Perspective camera for picking and projection
//!
//! View space is in points with the origin at the top-left and y pointing
//! down, the same space taps arrive in.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::ray::Ray;
use crate::consts::*;

/// Viewport size in view-space points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// View-space point to normalized device coordinates
    pub fn point_to_ndc(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * point.x / self.width - 1.0,
            1.0 - 2.0 * point.y / self.height,
        )
    }

    /// Normalized device coordinates to a view-space point
    pub fn ndc_to_point(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}

/// Camera placement and lens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y_degrees: CAMERA_FOV_Y_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, viewport: &Viewport) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            viewport.aspect(),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self, viewport: &Viewport) -> Mat4 {
        self.projection_matrix(viewport) * self.view_matrix()
    }

    /// Ray from the near plane through a view-space point
    pub fn screen_ray(&self, viewport: &Viewport, point: Vec2) -> Ray {
        let ndc = viewport.point_to_ndc(point);
        let inv = self.view_projection(viewport).inverse();
        // perspective_rh maps depth to [0, 1]
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }

    /// Project a world point to view space; `None` when it is behind the camera
    pub fn project(&self, viewport: &Viewport, world: Vec3) -> Option<Vec2> {
        let to_point = world - self.position;
        let facing = (self.target - self.position).normalize_or_zero();
        if to_point.dot(facing) <= 0.0 {
            return None;
        }
        let ndc = self.view_projection(viewport).project_point3(world);
        Some(viewport.ndc_to_point(ndc.truncate()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_looks_down_neg_z() {
        let camera = Camera::default();
        let viewport = Viewport::new(400.0, 800.0);
        let ray = camera.screen_ray(&viewport, viewport.center());
        assert!(ray.dir.abs_diff_eq(Vec3::NEG_Z, 1e-4));
        assert!((ray.origin.z + CAMERA_NEAR).abs() < 1e-3);
    }

    #[test]
    fn test_project_then_pick_same_point() {
        let camera = Camera::default();
        let viewport = Viewport::new(400.0, 800.0);
        let world = Vec3::new(12.0, -20.0, -105.0);
        let screen = camera.project(&viewport, world).unwrap();
        let ray = camera.screen_ray(&viewport, screen);
        assert!(ray.intersect_sphere(world, 0.5).is_some());
    }

    #[test]
    fn test_project_up_is_screen_up() {
        let camera = Camera::default();
        let viewport = Viewport::new(400.0, 800.0);
        let above = camera.project(&viewport, Vec3::new(0.0, 10.0, -50.0)).unwrap();
        assert!(above.y < viewport.center().y);
    }

    #[test]
    fn test_project_behind_camera() {
        let camera = Camera::default();
        let viewport = Viewport::default();
        assert!(camera.project(&viewport, Vec3::new(0.0, 0.0, 5.0)).is_none());
    }
}
