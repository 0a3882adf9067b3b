//! Pipes and the ordered set of live pipes
//!
//! A gap is built from two [`Obstacle`]s: one rising from the floor and one
//! hanging from the ceiling. Each obstacle owns a head cap and a body
//! segment, created together and destroyed together.

use glam::Vec2;

use super::body::{BodyFactory, BodyHandle, BodyPart, BodySpec};
use crate::settings::WorldConfig;

/// Heights of the two halves of a gap.
///
/// `center` is measured from the bottom of the span (0..=span).
pub fn gap_heights(center: f32, gap_size: f32, span: f32) -> (f32, f32) {
    let half = gap_size * 0.5;
    (center - half, span - center - half)
}

/// Valid range for a gap centre, as `(min, max)`
pub fn gap_center_range(gap_size: f32, span: f32, edge_margin: f32) -> (f32, f32) {
    let half = gap_size * 0.5;
    (half + edge_margin, span - half - edge_margin)
}

/// A body owned by an obstacle, with its current anchor
#[derive(Debug)]
struct OwnedBody {
    handle: BodyHandle,
    position: Vec2,
}

impl OwnedBody {
    fn spawn(factory: &mut dyn BodyFactory, spec: BodySpec) -> Self {
        Self {
            handle: factory.spawn(spec),
            position: spec.position,
        }
    }
}

/// One half of a gap
#[derive(Debug)]
pub struct Obstacle {
    head: OwnedBody,
    body: OwnedBody,
    is_bottom: bool,
    height: f32,
}

impl Obstacle {
    /// Instantiate head and body for a pipe of `height` at `x`
    pub fn spawn(
        factory: &mut dyn BodyFactory,
        world: &WorldConfig,
        height: f32,
        x: f32,
        is_bottom: bool,
    ) -> Self {
        let v = world.camera_size;
        let head_h = world.pipe_head_height;

        let head_y = if is_bottom {
            -v + height - head_h * 0.5
        } else {
            v - height + head_h * 0.5
        };
        let head = OwnedBody::spawn(
            factory,
            BodySpec {
                part: BodyPart::Head,
                position: Vec2::new(x, head_y),
                size: Vec2::new(world.pipe_body_width, head_h),
                flip_y: false,
                collider_offset: Vec2::ZERO,
            },
        );

        let body = OwnedBody::spawn(
            factory,
            BodySpec {
                part: BodyPart::Body,
                position: Vec2::new(x, if is_bottom { -v } else { v }),
                size: Vec2::new(world.pipe_body_width, height),
                flip_y: !is_bottom,
                collider_offset: Vec2::new(0.0, height * 0.5),
            },
        );

        Self {
            head,
            body,
            is_bottom,
            height,
        }
    }

    /// Horizontal position, read from the head cap
    pub fn x(&self) -> f32 {
        self.head.position.x
    }

    pub fn is_bottom(&self) -> bool {
        self.is_bottom
    }

    /// Length of the body segment from its screen edge
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn head_position(&self) -> Vec2 {
        self.head.position
    }

    pub fn body_position(&self) -> Vec2 {
        self.body.position
    }

    pub fn head_handle(&self) -> BodyHandle {
        self.head.handle
    }

    pub fn body_handle(&self) -> BodyHandle {
        self.body.handle
    }

    /// Move both bodies left by `distance`
    pub fn advance(&mut self, distance: f32, factory: &mut dyn BodyFactory) {
        let delta = Vec2::new(-distance, 0.0);
        for part in [&mut self.head, &mut self.body] {
            part.position += delta;
            factory.translate(part.handle, delta);
        }
    }

    /// Release both bodies. Consumes the obstacle so it can't be reused.
    pub fn destroy(self, factory: &mut dyn BodyFactory) {
        factory.destroy(self.head.handle);
        factory.destroy(self.body.handle);
    }
}

/// Live obstacles in spawn order.
///
/// Speed is uniform, so spawn order is also left-to-right order.
#[derive(Debug, Default)]
pub struct ObstacleSet {
    items: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.items.iter()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.items.push(obstacle);
    }

    /// Move every obstacle left, count gaps passing `player_x`, and destroy
    /// whatever ends up left of `destroy_x`.
    ///
    /// Only bottom halves count, so each gap scores once. Returns the
    /// number of gaps passed this call.
    pub fn advance(
        &mut self,
        distance: f32,
        player_x: f32,
        destroy_x: f32,
        factory: &mut dyn BodyFactory,
    ) -> u32 {
        let mut passed = 0;
        let mut kept = Vec::with_capacity(self.items.len());

        for mut obstacle in self.items.drain(..) {
            let was_right = obstacle.x() > player_x;
            obstacle.advance(distance, factory);
            if was_right && obstacle.x() <= player_x && obstacle.is_bottom() {
                passed += 1;
            }

            if obstacle.x() < destroy_x {
                log::trace!("culling obstacle at x={:.2}", obstacle.x());
                obstacle.destroy(factory);
            } else {
                kept.push(obstacle);
            }
        }

        self.items = kept;
        passed
    }

    /// Destroy everything
    pub fn clear(&mut self, factory: &mut dyn BodyFactory) {
        for obstacle in self.items.drain(..) {
            obstacle.destroy(factory);
        }
    }
}
