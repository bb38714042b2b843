//! Flap3D - simulation core for a 3D side-scrolling flappy game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (body kinematics, obstacle field, collisions, game state)
//! - `render`: Narrow per-frame interface consumed by the host renderer
//! - `config`: Data-driven tuning with validation

pub mod config;
pub mod render;
pub mod sim;

pub use config::{BodyConfig, CameraConfig, ConfigError, FieldConfig, GameConfig};

use glam::Mat4;

/// Game configuration constants (defaults for [`GameConfig`])
pub mod consts {
    use std::f32::consts::PI;

    /// Gravitational acceleration (units/s²)
    pub const GRAVITY: f32 = 9.8;
    /// Upward speed imparted by a flap (units/s)
    pub const FLAP_VELOCITY: f32 = 4.0;
    /// Height the body hovers at before the first flap
    pub const REST_HEIGHT: f32 = 10.0;
    pub const BODY_RADIUS: f32 = 1.0;

    /// Tilt step; tilt rate grows as `TILT_STEP * (1 + t)` after a flap
    pub const TILT_STEP: f32 = PI / 64.0;
    /// Nose-down limit
    pub const MAX_TILT: f32 = PI / 8.0 * 3.5;
    /// Nose-up snap applied on every flap
    pub const FLAP_TILT: f32 = -PI / 8.0;

    /// Obstacle field defaults
    pub const PIPE_COUNT: u32 = 100;
    pub const PIPE_LEN_MIN: u32 = 2;
    pub const PIPE_LEN_MAX: u32 = 7;
    /// Lower + upper pillar length units per pair
    pub const PIPE_MAX_SPAN: u32 = 9;
    /// Vertical gap between lower and upper pillar
    pub const PIPE_GAP: f32 = 20.0;
    /// Along-track spacing between consecutive pairs
    pub const PIPE_DISTANCE: f32 = 10.0;
    /// Along-track distance from the body to the first pair
    pub const STARTING_DISTANCE: f32 = 10.0;
    /// Field scroll speed (units/s)
    pub const SCROLL_SPEED: f32 = 4.0;

    /// Pillar geometry
    pub const PILLAR_HALF_WIDTH: f32 = 1.0;
    pub const CAP_HALF_WIDTH: f32 = 1.2;
    pub const CAP_HEIGHT: f32 = 0.5;

    /// Camera blend per frame
    pub const CAMERA_BLEND: f32 = 0.1;
}

/// Linear interpolation between two matrices, column by column
#[inline]
pub fn lerp_mat4(from: Mat4, to: Mat4, t: f32) -> Mat4 {
    Mat4::from_cols(
        from.x_axis.lerp(to.x_axis, t),
        from.y_axis.lerp(to.y_axis, t),
        from.z_axis.lerp(to.z_axis, t),
        from.w_axis.lerp(to.w_axis, t),
    )
}

/// Convert a `#RRGGBB` literal into linear RGBA
#[inline]
pub const fn hex_color(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        1.0,
    ]
}
