//! Renderer-facing interface
//!
//! The simulation never draws. Each frame it exposes body and pillar poses,
//! the blended camera view and whether the end screen is up; the host turns
//! those into draw calls through a [`RenderSink`] or a GPU instance buffer.

pub mod frame;
pub mod instance;

pub use frame::{Frame, PillarPart, PillarPose, RenderSink, pillar_poses, submit};
pub use instance::{BoxInstance, Material, colors};
