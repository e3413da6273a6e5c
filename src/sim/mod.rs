//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by handle id)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod camera;
pub mod controller;
pub mod demo;
pub mod graph;
pub mod ray;
pub mod scene;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autoplay::AutoPlayer;
pub use camera::{Camera, Viewport};
pub use controller::{GameController, TapOutcome};
pub use demo::{DemoSummary, run_demo};
pub use graph::{LightKind, Node, NodeKind, SceneGraph, SceneStats};
pub use ray::Ray;
pub use scene::{HitResult, Scene, SceneEvent};
pub use spawn::{SpawnPoint, random_spawn};
pub use state::{ActiveTarget, AnimationId, GamePhase, HighlightId, NodeId, RoundState};
pub use tick::{FixedStep, TickInput, TickReport, tick};
