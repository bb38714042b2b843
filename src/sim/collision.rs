//! Circle vs axis-aligned rectangle collision
//!
//! Everything happens in the (along-track, vertical) plane: the body is a
//! circle and each pillar is a rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the minimum corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Point of the rectangle closest to `p` (clamped per axis)
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Contact between the body and one pillar
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Body touches or overlaps the pillar
    pub hit: bool,
    /// Point on the pillar nearest the body center, reported in `Collided`
    pub point: Vec2,
    /// Unit vector from the pillar surface out toward the body
    pub normal: Vec2,
    /// Depth of the body inside the pillar (0 when just touching)
    pub penetration: f32,
}

impl CollisionResult {
    /// Body clear of the pillar
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Contact between a circle and a rectangle
///
/// Touching counts: a circle whose edge lies exactly on the rectangle is a hit.
pub fn circle_rect_contact(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(center);
    let offset = center - closest;
    let dist = offset.length();

    if dist > radius {
        return CollisionResult::miss();
    }

    let normal = if dist > 0.0 {
        offset / dist
    } else {
        // Center inside the rectangle: push out through the nearest face
        let to_min = center - rect.min();
        let to_max = rect.max() - center;
        let candidates = [
            (to_min.x, Vec2::NEG_X),
            (to_max.x, Vec2::X),
            (to_min.y, Vec2::NEG_Y),
            (to_max.y, Vec2::Y),
        ];
        candidates
            .iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map_or(Vec2::Y, |c| c.1)
    };

    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: radius - dist,
    }
}

/// Whether a circle touches or overlaps a rectangle
#[inline]
pub fn collides(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance(closest) <= radius
}
