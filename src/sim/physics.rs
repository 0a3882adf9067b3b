//! Player rigid body
//!
//! The player never writes positions directly. It switches the body between
//! static and dynamic and assigns vertical velocity; integration happens here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Whether the physics step moves the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Frozen in place, ignores gravity
    #[default]
    Static,
    /// Simulated: gravity and velocity apply
    Dynamic,
}

/// The player's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Half extent of the square collider
    pub radius: f32,
}

impl PlayerBody {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            kind: BodyKind::Static,
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Switch body type. Going static drops any velocity.
    pub fn set_kind(&mut self, kind: BodyKind) {
        self.kind = kind;
        if kind == BodyKind::Static {
            self.vel = Vec2::ZERO;
        }
    }

    /// Overwrite vertical velocity
    pub fn set_vertical_velocity(&mut self, vy: f32) {
        self.vel.y = vy;
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// Advance one step under `gravity` (downward acceleration)
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        if self.kind == BodyKind::Static {
            return;
        }
        self.vel.y -= gravity * dt;
        self.pos += self.vel * dt;
    }

    pub fn collider(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }
}
