//! Axis-aligned collision boxes
//!
//! Every collider in the game is an upright rectangle, so overlap tests are
//! simple interval checks on both axes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as centre and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Square box around a point
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::new(center, Vec2::splat(radius))
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        d.x < reach.x && d.y < reach.y
    }
}

/// True if `b` pokes out above `top` or below `bottom`
pub fn outside_vertical_span(b: &Aabb, bottom: f32, top: f32) -> bool {
    b.min().y < bottom || b.max().y > top
}
