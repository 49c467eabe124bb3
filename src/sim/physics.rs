//! Physics port and the arcade implementation
//!
//! The match logic never moves bodies itself. It sets velocities and asks a
//! `Physics` implementation to integrate, clamp against the world edges and
//! test overlaps. `ArcadePhysics` does this with axis-aligned boxes in screen
//! space (x right, y down).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rigid box moved by the physics engine
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Disabled bodies neither move nor overlap
    pub enabled: bool,
    /// Clamp against the world edges whose checks are on
    pub collide_world_bounds: bool,
    /// Report when the body leaves the world entirely
    pub check_world_bounds: bool,
    /// Restitution applied on world-edge contact (1 = fully elastic)
    pub bounce: f32,
    /// Whether the body currently intersects the world
    pub in_world: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            enabled: true,
            collide_world_bounds: false,
            check_world_bounds: false,
            bounce: 0.0,
            in_world: true,
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vec2 {
        self.pos - self.half_size()
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.half_size()
    }

    /// Teleport and stop
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.in_world = true;
    }
}

/// Which world edges stop bodies that collide with world bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryChecks {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Default for BoundaryChecks {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            up: true,
            down: true,
        }
    }
}

/// Something the engine noticed while integrating a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsEvent {
    /// The body no longer intersects the world
    OutOfBounds,
}

/// Engine operations the match logic depends on
pub trait Physics {
    fn set_boundary_checks(&mut self, checks: BoundaryChecks);

    fn boundary_checks(&self) -> BoundaryChecks;

    /// Advance one body by `dt`, resolving world-edge contacts
    fn integrate(&self, body: &mut Body, dt: f32) -> Option<BoundsEvent>;

    /// Both bodies enabled and their boxes intersect
    fn overlaps(&self, a: &Body, b: &Body) -> bool;

    fn velocity_from_angle(&self, angle_deg: f32, speed: f32) -> Vec2 {
        crate::velocity_from_angle(angle_deg, speed)
    }
}

/// Box physics over a rectangular world anchored at the origin
#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    pub world_size: Vec2,
    checks: BoundaryChecks,
}

impl ArcadePhysics {
    pub fn new(world_size: Vec2) -> Self {
        Self {
            world_size,
            checks: BoundaryChecks::default(),
        }
    }

    fn intersects_world(&self, body: &Body) -> bool {
        let min = body.min();
        let max = body.max();
        max.x >= 0.0 && min.x <= self.world_size.x && max.y >= 0.0 && min.y <= self.world_size.y
    }

    fn collide_world_bounds(&self, body: &mut Body) {
        let half = body.half_size();

        if self.checks.left && body.pos.x - half.x < 0.0 {
            body.pos.x = half.x;
            body.vel.x = -body.vel.x * body.bounce;
        } else if self.checks.right && body.pos.x + half.x > self.world_size.x {
            body.pos.x = self.world_size.x - half.x;
            body.vel.x = -body.vel.x * body.bounce;
        }

        if self.checks.up && body.pos.y - half.y < 0.0 {
            body.pos.y = half.y;
            body.vel.y = -body.vel.y * body.bounce;
        } else if self.checks.down && body.pos.y + half.y > self.world_size.y {
            body.pos.y = self.world_size.y - half.y;
            body.vel.y = -body.vel.y * body.bounce;
        }
    }
}

impl Physics for ArcadePhysics {
    fn set_boundary_checks(&mut self, checks: BoundaryChecks) {
        self.checks = checks;
    }

    fn boundary_checks(&self) -> BoundaryChecks {
        self.checks
    }

    fn integrate(&self, body: &mut Body, dt: f32) -> Option<BoundsEvent> {
        if !body.enabled {
            return None;
        }

        body.pos += body.vel * dt;

        if body.collide_world_bounds {
            self.collide_world_bounds(body);
        }

        if body.check_world_bounds {
            let inside = self.intersects_world(body);
            if body.in_world && !inside {
                body.in_world = false;
                return Some(BoundsEvent::OutOfBounds);
            }
            body.in_world = inside;
        }

        None
    }

    fn overlaps(&self, a: &Body, b: &Body) -> bool {
        if !a.enabled || !b.enabled {
            return false;
        }
        let (a_min, a_max) = (a.min(), a.max());
        let (b_min, b_max) = (b.min(), b.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}
