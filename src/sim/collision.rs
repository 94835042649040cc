//! Axis-aligned bounding box collision tests
//!
//! Every car and pickup on the road is a box, so overlap testing is a pair
//! of interval checks per axis. Entities store their center and full size;
//! the half extents are derived here.

use glam::Vec2;

/// An axis-aligned bounding box (center + half extents)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    /// Build from a center position and a full size
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Overlap test. Touching edges do not count as a collision.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    /// True when the box is fully below `bound_y` (top edge past the bound)
    pub fn fully_below(&self, bound_y: f32) -> bool {
        self.min().y > bound_y
    }
}
