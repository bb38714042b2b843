//! Controlled body kinematics
//!
//! Height and tilt are closed-form functions of the time since the last flap,
//! so there is no integration drift and no dependency on frame rate for height.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::BodyConfig;

/// The flapping body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Height at the moment of the last flap
    pub base_y: f32,
    /// Time of the last flap (`None` until the first one)
    pub impulse_time: Option<f32>,
    /// Pitch in radians (positive = nose down)
    pub tilt: f32,
    /// Current height, never below the floor
    pub position: f32,
    pub radius: f32,
}

impl Body {
    /// Body in its pre-game hover pose
    pub fn new(config: &BodyConfig) -> Self {
        Self {
            base_y: 0.0,
            impulse_time: None,
            tilt: 0.0,
            position: config.rest_height,
            radius: config.radius,
        }
    }

    /// Seconds since the last flap (0 before the first one or if time ran backwards)
    #[inline]
    pub fn time_since_impulse(&self, now: f32) -> f32 {
        self.impulse_time.map_or(0.0, |t0| (now - t0).max(0.0))
    }

    /// Height at `now` without touching state
    pub fn height_at(&self, now: f32, config: &BodyConfig) -> f32 {
        if self.impulse_time.is_none() {
            return config.rest_height;
        }
        let t = self.time_since_impulse(now);
        let displacement = config.base_velocity * t - 0.5 * config.gravity * t * t;
        (self.base_y + displacement).max(0.0)
    }

    /// Advance height and tilt to `now`, returning the updated snapshot
    pub fn update(&mut self, now: f32, config: &BodyConfig) -> Self {
        self.position = self.height_at(now, config);

        // Tilt accumulates every update and speeds up the longer since the flap
        let t = self.time_since_impulse(now);
        let rate = config.tilt_step * (1.0 + t);
        self.tilt = (self.tilt + t * rate).min(config.max_tilt);

        *self
    }

    /// Flap: restart the arc from the current height and snap the nose up
    pub fn impulse(&mut self, now: f32, config: &BodyConfig) {
        self.position = self.height_at(now, config);
        self.base_y = self.position;
        self.impulse_time = Some(now);
        self.tilt = config.flap_tilt.min(config.max_tilt);
    }

    /// Back to the hover pose
    pub fn reset(&mut self, config: &BodyConfig) {
        *self = Self::new(config);
    }

    /// Center in the (along-track, vertical) plane; the body sits at along-track 0
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(0.0, self.position)
    }

    /// World transform for rendering
    pub fn pose(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.position, 0.0)) * Mat4::from_rotation_x(self.tilt)
    }
}
