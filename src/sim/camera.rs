//! Camera view controller
//!
//! The active view is eased toward the selected target every frame, so a mode
//! switch never cuts.

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::lerp_mat4;

/// Which fixed view the camera is heading for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Looking at the track from the side
    #[default]
    Side,
    /// Behind the body, looking down the track
    Chase,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Side => CameraMode::Chase,
            CameraMode::Chase => CameraMode::Side,
        }
    }
}

/// One blend step from `active` toward `target`
#[inline]
pub fn step(active: Mat4, target: Mat4, blend: f32) -> Mat4 {
    lerp_mat4(active, target, blend)
}

/// Smoothed camera state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraController {
    pub mode: CameraMode,
    /// View transform handed to the renderer
    pub view: Mat4,
}

impl CameraController {
    /// Starts settled on the side view
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            mode: CameraMode::Side,
            view: config.side_view,
        }
    }

    pub fn target(&self, config: &CameraConfig) -> Mat4 {
        match self.mode {
            CameraMode::Side => config.side_view,
            CameraMode::Chase => config.chase_view,
        }
    }

    pub fn toggle(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    /// Ease one frame toward the current target
    pub fn update(&mut self, config: &CameraConfig) -> Mat4 {
        self.view = step(self.view, self.target(config), config.blend_factor);
        self.view
    }
}
