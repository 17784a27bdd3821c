//! Collision detection and response for boxes
//!
//! Movement is resolved one axis at a time: apply the x displacement, undo it
//! if it lands inside a wall, then do the same for y. Blocking one axis never
//! blocks the other, which is what lets actors slide along walls.

use glam::Vec2;

use super::aabb::Aabb;
use super::state::{Actor, Pickup, StaticBody};

/// Anything with a collision box
pub trait Bounded {
    fn bounds(&self) -> &Aabb;
}

impl Bounded for Aabb {
    fn bounds(&self) -> &Aabb {
        self
    }
}

impl Bounded for Actor {
    fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

impl Bounded for StaticBody {
    fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

impl Bounded for Pickup {
    fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

/// Which axes were blocked during a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub blocked_x: bool,
    pub blocked_y: bool,
}

impl MoveResult {
    /// Zero the velocity components on blocked axes
    pub fn stop_blocked(self, vel: Vec2) -> Vec2 {
        Vec2::new(
            if self.blocked_x { 0.0 } else { vel.x },
            if self.blocked_y { 0.0 } else { vel.y },
        )
    }
}

/// True if `bounds` overlaps any member of `group`
pub fn hits_any<T: Bounded>(bounds: &Aabb, group: &[T]) -> bool {
    group.iter().any(|item| bounds.overlaps(item.bounds()))
}

/// Indices of every member of `group` that overlaps `bounds`
pub fn overlaps_any<T: Bounded>(bounds: &Aabb, group: &[T]) -> Vec<usize> {
    group
        .iter()
        .enumerate()
        .filter(|(_, item)| bounds.overlaps(item.bounds()))
        .map(|(i, _)| i)
        .collect()
}

/// Move `bounds` by `delta`, reverting each axis that would overlap a static body
pub fn resolve_against_static<T: Bounded>(
    bounds: &mut Aabb,
    delta: Vec2,
    statics: &[T],
) -> MoveResult {
    let mut result = MoveResult::default();

    if delta.x != 0.0 {
        let x0 = bounds.center.x;
        bounds.center.x += delta.x;
        if hits_any(bounds, statics) {
            bounds.center.x = x0;
            result.blocked_x = true;
        }
    }

    if delta.y != 0.0 {
        let y0 = bounds.center.y;
        bounds.center.y += delta.y;
        if hits_any(bounds, statics) {
            bounds.center.y = y0;
            result.blocked_y = true;
        }
    }

    result
}
