//! Ray casting against bounding spheres
//!
//! Picking only needs "nearest sphere along a ray", so nodes are treated as
//! spheres of their pick radius.

use glam::Vec3;

/// A half-line with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Create a ray; `dir` is normalized here
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    /// Distance to the first intersection with a sphere, if any.
    ///
    /// A ray starting inside the sphere hits at t = 0.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;

        if c <= 0.0 {
            return Some(0.0);
        }
        // Origin outside and pointing away
        if b > 0.0 {
            return None;
        }

        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        Some(-b - disc.sqrt())
    }
}
