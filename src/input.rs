//! Tap collection
//!
//! Platform handlers push taps here; the tick drains them in arrival order.

use glam::Vec2;

/// Pending taps in view space
#[derive(Debug, Clone)]
pub struct InputState {
    taps: Vec<Vec2>,
    /// Physical pixels per view point (device pixel ratio)
    scale_factor: f32,
}

impl InputState {
    pub fn new(scale_factor: f32) -> Self {
        Self {
            taps: Vec::new(),
            scale_factor: if scale_factor > 0.0 { scale_factor } else { 1.0 },
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Queue a tap already in view-space points
    pub fn push_tap(&mut self, point: Vec2) {
        self.taps.push(point);
    }

    /// Queue a tap given in physical pixels
    pub fn push_physical_tap(&mut self, x: f32, y: f32) {
        self.taps.push(Vec2::new(x, y) / self.scale_factor);
    }

    pub fn has_taps(&self) -> bool {
        !self.taps.is_empty()
    }

    /// Take all pending taps, oldest first
    pub fn drain_taps(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.taps)
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_taps_scaled() {
        let mut input = InputState::new(2.0);
        input.push_physical_tap(300.0, 100.0);
        assert_eq!(input.drain_taps(), vec![Vec2::new(150.0, 50.0)]);
        assert!(!input.has_taps());
    }

    #[test]
    fn test_drain_preserves_order() {
        let mut input = InputState::default();
        input.push_tap(Vec2::new(1.0, 1.0));
        input.push_tap(Vec2::new(2.0, 2.0));
        assert_eq!(
            input.drain_taps(),
            vec![Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]
        );
    }

    #[test]
    fn test_invalid_scale_factor() {
        assert_eq!(InputState::new(0.0).scale_factor(), 1.0);
    }
}
