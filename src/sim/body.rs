//! Renderable/collidable bodies and the factory that creates them
//!
//! The level never owns engine objects directly. It asks a [`BodyFactory`]
//! to instantiate a body from a [`BodySpec`], keeps the returned handle, and
//! tells the factory when the body moves or must be destroyed.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Opaque identifier for a body created by a factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Which prefab a body is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyPart {
    /// Cap at the open end of a pipe
    Head,
    /// Stretched segment from the screen edge to the cap
    Body,
}

/// Sprite and collider configuration for one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub part: BodyPart,
    /// Anchor position in world space
    pub position: Vec2,
    /// Sprite and collider size
    pub size: Vec2,
    /// Mirrored vertically (top pipes hang from the ceiling)
    pub flip_y: bool,
    /// Collider centre relative to the anchor, before mirroring
    pub collider_offset: Vec2,
}

impl BodySpec {
    /// World-space collider
    pub fn collider(&self) -> Aabb {
        let mut offset = self.collider_offset;
        if self.flip_y {
            offset.y = -offset.y;
        }
        Aabb::new(self.position + offset, self.size * 0.5)
    }
}

/// Asset/instantiation collaborator
pub trait BodyFactory {
    /// Create a body and return its handle
    fn spawn(&mut self, spec: BodySpec) -> BodyHandle;
    /// Move an existing body
    fn translate(&mut self, handle: BodyHandle, delta: Vec2);
    /// Destroy a body; the handle is invalid afterwards
    fn destroy(&mut self, handle: BodyHandle);
}

/// In-memory body store.
///
/// Stands in for the engine's scene: tracks every live body so colliders can
/// be queried and leaks can be detected.
#[derive(Debug, Default)]
pub struct BodyArena {
    bodies: BTreeMap<BodyHandle, BodySpec>,
    next_id: u32,
}

impl BodyArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&BodySpec> {
        self.bodies.get(&handle)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains_key(&handle)
    }

    /// True if any live collider overlaps `area`
    pub fn overlaps(&self, area: &Aabb) -> bool {
        self.bodies.values().any(|b| b.collider().overlaps(area))
    }
}

impl BodyFactory for BodyArena {
    fn spawn(&mut self, spec: BodySpec) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        self.bodies.insert(handle, spec);
        handle
    }

    fn translate(&mut self, handle: BodyHandle, delta: Vec2) {
        match self.bodies.get_mut(&handle) {
            Some(body) => body.position += delta,
            None => log::warn!("translate on unknown body {:?}", handle),
        }
    }

    fn destroy(&mut self, handle: BodyHandle) {
        if self.bodies.remove(&handle).is_none() {
            log::warn!("destroy on unknown body {:?}", handle);
        }
    }
}
