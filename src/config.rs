//! Game tuning and configuration
//!
//! Loaded from JSON by the host launcher; every section falls back to the
//! reference defaults so partial documents are fine.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a configuration was rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("obstacle count must be positive")]
    NoObstacles,
    #[error("obstacle length range {min}..={max} is empty")]
    EmptyLengthRange { min: u32, max: u32 },
    #[error("obstacle length {max} exceeds pair span {span}")]
    LengthExceedsSpan { max: u32, span: u32 },
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },
    #[error("{name} must be at least {min} to cover pillar contact, got {value}")]
    MarginTooNarrow {
        name: &'static str,
        value: f32,
        min: f32,
    },
    #[error("obstacle length {length} outside {min}..={max}")]
    LengthOutOfRange { length: u32, min: u32, max: u32 },
    #[error("camera blend factor must be in (0, 1], got {0}")]
    BlendOutOfRange(f32),
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Controlled body kinematics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Upward speed right after a flap
    pub base_velocity: f32,
    pub gravity: f32,
    /// Height held before the first flap
    pub rest_height: f32,
    pub radius: f32,
    pub tilt_step: f32,
    pub max_tilt: f32,
    /// Tilt forced on every flap (negative = nose up)
    pub flap_tilt: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            base_velocity: FLAP_VELOCITY,
            gravity: GRAVITY,
            rest_height: REST_HEIGHT,
            radius: BODY_RADIUS,
            tilt_step: TILT_STEP,
            max_tilt: MAX_TILT,
            flap_tilt: FLAP_TILT,
        }
    }
}

/// Obstacle field layout and scrolling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub pipe_count: u32,
    /// Inclusive lower bound for generated lengths
    pub length_min: u32,
    /// Inclusive upper bound for generated lengths
    pub length_max: u32,
    /// Lower + upper pillar lengths of one pair
    pub max_span: u32,
    pub pipe_gap: f32,
    pub pipe_distance: f32,
    pub starting_distance: f32,
    pub scroll_speed: f32,
    pub pillar_half_width: f32,
    pub cap_half_width: f32,
    pub cap_height: f32,
    /// How far behind the body (along track) instances are still reported
    pub view_behind: f32,
    /// How far ahead of the body instances are reported
    pub view_ahead: f32,
    /// Only pillars within this along-track distance of the body are hit-tested
    pub collision_band: f32,
    /// Re-roll obstacle lengths on restart
    pub regenerate_on_restart: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            pipe_count: PIPE_COUNT,
            length_min: PIPE_LEN_MIN,
            length_max: PIPE_LEN_MAX,
            max_span: PIPE_MAX_SPAN,
            pipe_gap: PIPE_GAP,
            pipe_distance: PIPE_DISTANCE,
            starting_distance: STARTING_DISTANCE,
            scroll_speed: SCROLL_SPEED,
            pillar_half_width: PILLAR_HALF_WIDTH,
            cap_half_width: CAP_HALF_WIDTH,
            cap_height: CAP_HEIGHT,
            view_behind: 40.0,
            view_ahead: 200.0,
            collision_band: BODY_RADIUS + PILLAR_HALF_WIDTH + 1.0,
            regenerate_on_restart: false,
        }
    }
}

/// Camera targets and smoothing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub blend_factor: f32,
    /// View transform for the side-on camera
    pub side_view: Mat4,
    /// View transform for the camera behind the body
    pub chase_view: Mat4,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            blend_factor: CAMERA_BLEND,
            side_view: Mat4::from_translation(Vec3::new(0.0, -12.0, -32.0))
                * Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2),
            chase_view: Mat4::from_translation(Vec3::new(0.0, -15.0, -26.0))
                * Mat4::from_rotation_y(std::f32::consts::PI),
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub body: BodyConfig,
    pub field: FieldConfig,
    pub camera: CameraConfig,
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn at_least(name: &'static str, value: f32, min: f32) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::MarginTooNarrow { name, value, min })
    }
}

impl GameConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let body = &self.body;
        positive("gravity", body.gravity)?;
        positive("radius", body.radius)?;
        positive("tilt_step", body.tilt_step)?;
        non_negative("base_velocity", body.base_velocity)?;
        non_negative("rest_height", body.rest_height)?;
        non_negative("max_tilt", body.max_tilt)?;
        if !body.flap_tilt.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "flap_tilt",
                value: body.flap_tilt,
            });
        }

        let field = &self.field;
        if field.pipe_count == 0 {
            return Err(ConfigError::NoObstacles);
        }
        if field.length_min > field.length_max {
            return Err(ConfigError::EmptyLengthRange {
                min: field.length_min,
                max: field.length_max,
            });
        }
        if field.length_max > field.max_span {
            return Err(ConfigError::LengthExceedsSpan {
                max: field.length_max,
                span: field.max_span,
            });
        }
        positive("pipe_gap", field.pipe_gap)?;
        positive("pipe_distance", field.pipe_distance)?;
        positive("scroll_speed", field.scroll_speed)?;
        positive("pillar_half_width", field.pillar_half_width)?;
        non_negative("starting_distance", field.starting_distance)?;
        non_negative("cap_half_width", field.cap_half_width)?;
        non_negative("cap_height", field.cap_height)?;
        non_negative("view_behind", field.view_behind)?;
        non_negative("view_ahead", field.view_ahead)?;
        non_negative("collision_band", field.collision_band)?;

        // A pillar can touch the body from `radius + pillar_half_width` away along
        // the track, so the band and both view margins must reach that far
        let reach = body.radius + field.pillar_half_width;
        at_least("collision_band", field.collision_band, reach)?;
        at_least("view_behind", field.view_behind, field.collision_band)?;
        at_least("view_ahead", field.view_ahead, field.collision_band)?;

        let blend = self.camera.blend_factor;
        if !(blend > 0.0 && blend <= 1.0) {
            return Err(ConfigError::BlendOutOfRange(blend));
        }
        Ok(())
    }
}
