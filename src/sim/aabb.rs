//! Axis-aligned bounding boxes
//!
//! Every collidable thing in the game is a center-anchored box:
//! - center: world position (y up)
//! - half: half extents along x and y

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A center-anchored axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    /// Box from center and full width/height
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            half: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half.x * 2.0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.half.y * 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Same box moved by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            half: self.half,
        }
    }

    /// Strict overlap test: boxes that only share an edge do not overlap.
    ///
    /// Player and enemies both resolve against walls with this test, so an
    /// actor pushed flush against a wall can still slide along it.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Aabb::new(Vec2::new(8.0, 3.0), 10.0, 10.0);
        let c = Aabb::new(Vec2::new(30.0, 0.0), 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let right = Aabb::new(Vec2::new(10.0, 0.0), 10.0, 10.0);
        let above = Aabb::new(Vec2::new(0.0, 10.0), 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
    }

    #[test]
    fn test_bounds_and_translate() {
        let a = Aabb::new(Vec2::new(5.0, 5.0), 4.0, 2.0);
        assert_eq!(a.min(), Vec2::new(3.0, 4.0));
        assert_eq!(a.max(), Vec2::new(7.0, 6.0));
        assert_eq!(a.width(), 4.0);
        assert_eq!(a.height(), 2.0);

        let moved = a.translated(Vec2::new(1.0, -1.0));
        assert_eq!(moved.center, Vec2::new(6.0, 4.0));
        assert_eq!(moved.min(), Vec2::new(4.0, 3.0));
    }
}
