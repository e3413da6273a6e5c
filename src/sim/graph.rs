//! Headless scene engine
//!
//! Holds the node list, runs linear move animations and highlight timers, and
//! answers pick queries through the camera. Nothing here draws; a renderer
//! would read `nodes()` each frame.

use glam::{Quat, Vec2, Vec3};

use super::camera::{Camera, Viewport};
use super::scene::{HitResult, Scene, SceneEvent};
use super::state::{AnimationId, HighlightId, NodeId};
use crate::consts::TARGET_RADIUS;
use crate::{Color, look_rotation};

/// Light types the scene knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Omni,
    Ambient,
}

/// What a node represents
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// A ship the player must tap
    Target,
    /// Pickable scenery
    Prop,
    /// Light source (never pickable)
    Light { kind: LightKind, color: Color },
}

/// A node in the scene
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Vec3,
    pub rotation: Quat,
    /// Bounding sphere radius for picking; `None` for non-geometry nodes
    pub pick_radius: Option<f32>,
    /// Emission the node returns to after a highlight
    pub base_emission: Color,
    /// Emission currently shown
    pub emission: Color,
}

#[derive(Debug, Clone)]
struct MoveAnimation {
    id: AnimationId,
    node: NodeId,
    from: Vec3,
    to: Vec3,
    duration: f32,
    elapsed: f32,
}

#[derive(Debug, Clone)]
struct Highlight {
    id: HighlightId,
    node: NodeId,
    remaining: f32,
}

/// Counts reported for the statistics overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneStats {
    pub nodes: usize,
    pub targets: usize,
    pub animations: usize,
    pub highlights: usize,
}

/// In-memory scene graph
#[derive(Debug, Clone)]
pub struct SceneGraph {
    camera: Camera,
    viewport: Viewport,
    /// Pick radius given to spawned targets
    target_radius: f32,
    pub background: Color,
    /// Sorted by id (ids are allocated in increasing order)
    nodes: Vec<Node>,
    animations: Vec<MoveAnimation>,
    highlights: Vec<Highlight>,
    next_id: u32,
}

impl SceneGraph {
    pub fn new(camera: Camera, viewport: Viewport) -> Self {
        Self {
            camera,
            viewport,
            target_radius: TARGET_RADIUS,
            background: Color::BLACK,
            nodes: Vec::new(),
            animations: Vec::new(),
            highlights: Vec::new(),
            next_id: 1,
        }
    }

    /// Scene with an omni light above the camera and dim ambient fill
    pub fn with_default_lighting(camera: Camera, viewport: Viewport) -> Self {
        let mut scene = Self::new(camera, viewport);
        scene.add_light(LightKind::Omni, Vec3::new(0.0, 10.0, 10.0), Color::WHITE);
        scene.add_light(LightKind::Ambient, Vec3::ZERO, Color::DARK_GRAY);
        scene
    }

    pub fn set_target_radius(&mut self, radius: f32) {
        self.target_radius = radius;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Allocate a new handle value (shared by nodes, animations and highlights)
    fn next_handle(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert_node(
        &mut self,
        kind: NodeKind,
        position: Vec3,
        rotation: Quat,
        pick_radius: Option<f32>,
    ) -> NodeId {
        let id = NodeId(self.next_handle());
        self.nodes.push(Node {
            id,
            kind,
            position,
            rotation,
            pick_radius,
            base_emission: Color::BLACK,
            emission: Color::BLACK,
        });
        id
    }

    /// Add pickable scenery
    pub fn add_prop(&mut self, position: Vec3, radius: f32) -> NodeId {
        self.insert_node(NodeKind::Prop, position, Quat::IDENTITY, Some(radius))
    }

    pub fn add_light(&mut self, kind: LightKind, position: Vec3, color: Color) -> NodeId {
        self.insert_node(NodeKind::Light { kind, color }, position, Quat::IDENTITY, None)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.binary_search_by_key(&id, |n| n.id).ok().map(|i| &self.nodes[i])
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        match self.nodes.binary_search_by_key(&id, |n| n.id) {
            Ok(i) => Some(&mut self.nodes[i]),
            Err(_) => None,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn targets(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Target)
    }

    /// Whether the animation is still running
    pub fn is_animating(&self, animation: AnimationId) -> bool {
        self.animations.iter().any(|a| a.id == animation)
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            nodes: self.nodes.len(),
            targets: self.targets().count(),
            animations: self.animations.len(),
            highlights: self.highlights.len(),
        }
    }
}

impl Scene for SceneGraph {
    fn spawn_target(&mut self, position: Vec3, look_at: Vec3) -> NodeId {
        let rotation = look_rotation(position, look_at);
        let radius = self.target_radius;
        self.insert_node(NodeKind::Target, position, rotation, Some(radius))
    }

    fn remove_node(&mut self, node: NodeId) {
        match self.nodes.binary_search_by_key(&node, |n| n.id) {
            Ok(i) => {
                self.nodes.remove(i);
                // Removing a node stops everything running on it
                self.animations.retain(|a| a.node != node);
                self.highlights.retain(|h| h.node != node);
            }
            Err(_) => log::warn!("remove_node: unknown node {:?}", node),
        }
    }

    fn animate_move(&mut self, node: NodeId, destination: Vec3, duration: f32) -> AnimationId {
        let id = AnimationId(self.next_handle());
        match self.node(node) {
            Some(n) => {
                let from = n.position;
                self.animations.push(MoveAnimation {
                    id,
                    node,
                    from,
                    to: destination,
                    duration: duration.max(0.0),
                    elapsed: 0.0,
                });
            }
            None => log::warn!("animate_move: unknown node {:?}", node),
        }
        id
    }

    fn cancel_animation(&mut self, animation: AnimationId) {
        self.animations.retain(|a| a.id != animation);
    }

    fn hit_test(&self, point: Vec2) -> Option<HitResult> {
        let ray = self.camera.screen_ray(&self.viewport, point);
        self.nodes
            .iter()
            .filter_map(|n| {
                let radius = n.pick_radius?;
                let distance = ray.intersect_sphere(n.position, radius)?;
                Some(HitResult {
                    node: n.id,
                    is_target: n.kind == NodeKind::Target,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn highlight(&mut self, node: NodeId, color: Color, duration: f32) -> HighlightId {
        let id = HighlightId(self.next_handle());
        let Some(n) = self.node_mut(node) else {
            log::warn!("highlight: unknown node {:?}", node);
            return id;
        };
        n.emission = color;
        // A newer highlight owns the revert
        self.highlights.retain(|h| h.node != node);
        self.highlights.push(Highlight {
            id,
            node,
            remaining: duration.max(0.0),
        });
        id
    }

    fn advance(&mut self, dt: f32, events: &mut Vec<SceneEvent>) {
        let mut finished = Vec::new();
        for anim in &mut self.animations {
            anim.elapsed += dt;
            let t = if anim.duration > 0.0 {
                (anim.elapsed / anim.duration).min(1.0)
            } else {
                1.0
            };
            let pos = anim.from.lerp(anim.to, t);
            if let Ok(i) = self.nodes.binary_search_by_key(&anim.node, |n| n.id) {
                self.nodes[i].position = pos;
            }
            if t >= 1.0 {
                finished.push((anim.id, anim.node));
            }
        }
        self.animations.retain(|a| !finished.iter().any(|(id, _)| *id == a.id));
        events.extend(
            finished
                .into_iter()
                .map(|(animation, node)| SceneEvent::MoveCompleted { animation, node }),
        );

        let mut reverted = Vec::new();
        for hl in &mut self.highlights {
            hl.remaining -= dt;
            if hl.remaining <= 0.0 {
                reverted.push((hl.id, hl.node));
            }
        }
        self.highlights.retain(|h| h.remaining > 0.0);
        for (highlight, node) in reverted {
            if let Some(n) = self.node_mut(node) {
                n.emission = n.base_emission;
            }
            events.push(SceneEvent::HighlightReverted { highlight, node });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> SceneGraph {
        SceneGraph::with_default_lighting(Camera::default(), Viewport::new(400.0, 800.0))
    }

    fn run(scene: &mut SceneGraph, seconds: f32) -> Vec<SceneEvent> {
        let mut events = Vec::new();
        let steps = (seconds / 0.01).round() as u32;
        for _ in 0..steps {
            scene.advance(0.01, &mut events);
        }
        events
    }

    #[test]
    fn test_default_lighting_not_pickable() {
        let scene = scene();
        assert_eq!(scene.stats().nodes, 2);
        assert!(scene.hit_test(scene.viewport().center()).is_none());
    }

    #[test]
    fn test_move_interpolates_and_completes_once() {
        let mut scene = scene();
        let ship = scene.spawn_target(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO);
        let anim = scene.animate_move(ship, Vec3::ZERO, 1.0);

        let events = run(&mut scene, 0.5);
        assert!(events.is_empty());
        let z = scene.node(ship).unwrap().position.z;
        assert!((z + 50.0).abs() < 1.5, "halfway z was {z}");

        let events = run(&mut scene, 0.6);
        assert_eq!(
            events,
            vec![SceneEvent::MoveCompleted { animation: anim, node: ship }]
        );
        assert_eq!(scene.node(ship).unwrap().position, Vec3::ZERO);
        assert!(!scene.is_animating(anim));

        assert!(run(&mut scene, 1.0).is_empty());
    }

    #[test]
    fn test_cancelled_animation_never_completes() {
        let mut scene = scene();
        let ship = scene.spawn_target(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO);
        let anim = scene.animate_move(ship, Vec3::ZERO, 0.2);
        run(&mut scene, 0.1);
        scene.cancel_animation(anim);
        assert!(run(&mut scene, 1.0).is_empty());
    }

    #[test]
    fn test_removing_node_drops_its_animation() {
        let mut scene = scene();
        let ship = scene.spawn_target(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO);
        let anim = scene.animate_move(ship, Vec3::ZERO, 0.2);
        scene.remove_node(ship);
        assert!(!scene.is_animating(anim));
        assert!(scene.node(ship).is_none());
        assert!(run(&mut scene, 1.0).is_empty());
    }

    #[test]
    fn test_hit_test_picks_nearest() {
        let mut scene = scene();
        let far = scene.spawn_target(Vec3::new(0.0, 0.0, -100.0), Vec3::ZERO);
        let near = scene.add_prop(Vec3::new(0.0, 0.0, -40.0), 2.0);
        let hit = scene.hit_test(scene.viewport().center()).unwrap();
        assert_eq!(hit.node, near);
        assert!(!hit.is_target);

        scene.remove_node(near);
        let hit = scene.hit_test(scene.viewport().center()).unwrap();
        assert_eq!(hit.node, far);
        assert!(hit.is_target);
    }

    #[test]
    fn test_hit_test_empty_space() {
        let mut scene = scene();
        scene.spawn_target(Vec3::new(20.0, 20.0, -100.0), Vec3::ZERO);
        assert!(scene.hit_test(scene.viewport().center()).is_none());
    }

    #[test]
    fn test_highlight_reverts_after_duration() {
        let mut scene = scene();
        let prop = scene.add_prop(Vec3::new(0.0, 0.0, -30.0), 1.0);
        let hl = scene.highlight(prop, Color::RED, 0.5);
        assert_eq!(scene.node(prop).unwrap().emission, Color::RED);

        assert!(run(&mut scene, 0.3).is_empty());
        let events = run(&mut scene, 0.3);
        assert_eq!(
            events,
            vec![SceneEvent::HighlightReverted { highlight: hl, node: prop }]
        );
        assert_eq!(scene.node(prop).unwrap().emission, Color::BLACK);
    }

    #[test]
    fn test_rehighlight_replaces_pending_revert() {
        let mut scene = scene();
        let prop = scene.add_prop(Vec3::new(0.0, 0.0, -30.0), 1.0);
        scene.highlight(prop, Color::RED, 0.5);
        run(&mut scene, 0.3);
        let second = scene.highlight(prop, Color::RED, 0.5);
        let events = run(&mut scene, 0.3);
        assert!(events.is_empty());
        assert_eq!(scene.stats().highlights, 1);
        let events = run(&mut scene, 0.3);
        assert_eq!(
            events,
            vec![SceneEvent::HighlightReverted { highlight: second, node: prop }]
        );
    }

    #[test]
    fn test_spawned_target_faces_look_at() {
        let mut scene = scene();
        let pos = Vec3::new(25.0, 25.0, -105.0);
        let ship = scene.spawn_target(pos, Vec3::ZERO);
        let node = scene.node(ship).unwrap();
        assert!(crate::forward(node.rotation).abs_diff_eq((-pos).normalize(), 1e-4));
    }
}
