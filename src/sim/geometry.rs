//! Axis-aligned bounding boxes
//!
//! Every collider in the arena (walls, tanks, shells) is an AABB in world
//! space with y growing downward. Boxes are half-open: two boxes that only
//! share an edge do not intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left corner and extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    /// Bottom-right corner (exclusive)
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Overlap test: both axis projections must overlap
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// The box this one would occupy after moving by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Aabb {
        Aabb {
            min: self.min + delta,
            size: self.size,
        }
    }
}

/// Check a box against a set of boxes
pub fn hits_any<'a>(target: &Aabb, boxes: impl IntoIterator<Item = &'a Aabb>) -> bool {
    boxes.into_iter().any(|b| b.intersects(target))
}
