//! Per-frame snapshot handed to the host renderer

use glam::{Mat4, Vec3};

use super::instance::{BoxInstance, Material, colors};
use crate::config::FieldConfig;
use crate::sim::{GamePhase, GameState, PillarRect};

/// Which piece of a pillar a box represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillarPart {
    /// The long shaft
    Body,
    /// Wider lip at the open end facing the gap
    Cap,
    /// Dark opening inside the cap
    InnerRim,
}

impl PillarPart {
    pub fn color(self) -> [f32; 4] {
        match self {
            PillarPart::Body | PillarPart::Cap => colors::PIPE,
            PillarPart::InnerRim => colors::PIPE_RIM,
        }
    }

    pub fn material(self) -> Material {
        match self {
            PillarPart::Body | PillarPart::Cap => Material::Lit,
            PillarPart::InnerRim => Material::Unlit,
        }
    }
}

/// A unit box placed to draw part of a pillar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarPose {
    pub transform: Mat4,
    pub part: PillarPart,
    pub color: [f32; 4],
}

/// Box transform covering `[min, max]` in world space
fn box_between(min: Vec3, max: Vec3) -> Mat4 {
    let center = (min + max) * 0.5;
    let half = (max - min) * 0.5;
    Mat4::from_translation(center) * Mat4::from_scale(half)
}

/// Boxes for one pillar: shaft, then cap and rim at the gap-facing end
///
/// World axes: x lateral, y up, z along the track.
pub fn pillar_poses(pillar: &PillarRect, config: &FieldConfig) -> Vec<PillarPose> {
    let rect = pillar.rect;
    let height = rect.size.y;
    if height <= 0.0 {
        return Vec::new();
    }

    let z = pillar.instance.offset;
    let hw = config.pillar_half_width;
    let cap_h = config.cap_height.min(height);
    let cap_hw = config.cap_half_width;
    // Rim is a hair taller than the cap so it shows through the opening
    let rim_hw = cap_hw * 0.75;
    let rim_h = cap_h * 1.002;

    let (y0, y1) = (rect.min().y, rect.max().y);
    let cap_mid = if pillar.upper { y0 + cap_h * 0.5 } else { y1 - cap_h * 0.5 };

    let shaft = box_between(Vec3::new(-hw, y0, z - hw), Vec3::new(hw, y1, z + hw));
    let cap = Mat4::from_translation(Vec3::new(0.0, cap_mid, z))
        * Mat4::from_scale(Vec3::new(cap_hw, cap_h * 0.5, cap_hw));
    let rim = Mat4::from_translation(Vec3::new(0.0, cap_mid, z))
        * Mat4::from_scale(Vec3::new(rim_hw, rim_h * 0.5, rim_hw));

    [
        (shaft, PillarPart::Body),
        (cap, PillarPart::Cap),
        (rim, PillarPart::InnerRim),
    ]
    .into_iter()
    .map(|(transform, part)| PillarPose {
        transform,
        part,
        color: part.color(),
    })
    .collect()
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub phase: GamePhase,
    /// Body transform (height + tilt)
    pub body: Mat4,
    pub pillars: Vec<PillarPose>,
    /// Active (blended) camera view
    pub view: Mat4,
    /// Draw the game-over backdrop instead of the scene
    pub show_end_screen: bool,
    /// Color to clear the target with before drawing
    pub clear_color: [f32; 4],
    pub score: u32,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let pillars = state
            .pillars()
            .iter()
            .flat_map(|p| pillar_poses(p, &state.config.field))
            .collect();

        Self {
            phase: state.phase,
            body: state.body.pose(),
            pillars,
            view: state.camera.view,
            show_end_screen: state.phase == GamePhase::Ended,
            clear_color: match state.phase {
                GamePhase::Ended => colors::END_BACKDROP,
                _ => colors::BACKGROUND,
            },
            score: state.score(),
        }
    }

    /// Flattened instance list (body first) for a single instanced draw
    pub fn instances(&self) -> Vec<BoxInstance> {
        std::iter::once(BoxInstance::new(self.body, colors::BODY, Material::Lit))
            .chain(
                self.pillars
                    .iter()
                    .map(|p| BoxInstance::new(p.transform, p.color, p.part.material())),
            )
            .collect()
    }
}

/// Host-side drawing facility
pub trait RenderSink {
    fn clear(&mut self, color: [f32; 4]);

    fn set_view(&mut self, view: Mat4);

    fn draw_box(&mut self, model: Mat4, color: [f32; 4], material: Material);

    /// Terminal backdrop; default draws nothing
    fn draw_end_screen(&mut self, _score: u32) {}
}

/// Issue the draws for a frame in order: clear, view, body, pillars
pub fn submit<S: RenderSink + ?Sized>(frame: &Frame, sink: &mut S) {
    sink.clear(frame.clear_color);
    sink.set_view(frame.view);
    if frame.show_end_screen {
        sink.draw_end_screen(frame.score);
        return;
    }
    sink.draw_box(frame.body, colors::BODY, Material::Lit);
    for pillar in &frame.pillars {
        sink.draw_box(pillar.transform, pillar.color, pillar.part.material());
    }
}
