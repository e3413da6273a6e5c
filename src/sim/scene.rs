//! Scene collaborator contract
//!
//! The controller only talks to the world through this trait. Completion
//! notifications are delivered as events from `advance` rather than as
//! callbacks, so a cancelled animation simply never produces one.

use glam::{Vec2, Vec3};

use super::state::{AnimationId, HighlightId, NodeId};
use crate::Color;

/// Result of a pick under a view-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub node: NodeId,
    /// Whether the node was spawned as a target
    pub is_target: bool,
    /// Distance along the pick ray
    pub distance: f32,
}

/// Notifications produced while the scene advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    /// A move animation reached its destination
    MoveCompleted { animation: AnimationId, node: NodeId },
    /// A highlight timed out and the node's emission was restored
    HighlightReverted { highlight: HighlightId, node: NodeId },
}

/// The world the game runs in
pub trait Scene {
    /// Add a target node at `position` facing `look_at`
    fn spawn_target(&mut self, position: Vec3, look_at: Vec3) -> NodeId;

    /// Remove a node and everything pending on it
    fn remove_node(&mut self, node: NodeId);

    /// Move `node` linearly to `destination` over `duration` seconds
    fn animate_move(&mut self, node: NodeId, destination: Vec3, duration: f32) -> AnimationId;

    /// Stop an animation; its completion event will never be emitted
    fn cancel_animation(&mut self, animation: AnimationId);

    /// Nearest pickable node under a view-space point
    fn hit_test(&self, point: Vec2) -> Option<HitResult>;

    /// Set the node's emission to `color` and restore it after `duration`
    fn highlight(&mut self, node: NodeId, color: Color, duration: f32) -> HighlightId;

    /// Step animations and timers, appending any resulting events
    fn advance(&mut self, dt: f32, events: &mut Vec<SceneEvent>);
}
