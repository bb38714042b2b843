//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Time comes only from the host timestamp fed to `tick`
//! - Seeded RNG only, and only for obstacle generation
//! - Stable iteration order (window, then sequence index)

pub mod body;
pub mod camera;
pub mod clock;
pub mod collision;
pub mod field;
pub mod state;
pub mod tick;

pub use body::Body;
pub use camera::{CameraController, CameraMode};
pub use clock::SimClock;
pub use collision::{CollisionResult, Rect, circle_rect_contact, collides};
pub use field::{Obstacle, ObstacleField, ObstacleInstance, PillarRect, generate, pillar_rects};
pub use state::{GameEvent, GamePhase, GameState, RngState};
pub use tick::{TickInput, first_hit, tick};
