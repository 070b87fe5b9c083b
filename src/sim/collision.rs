//! Axis-aligned collision footprints
//!
//! Every collidable carries a footprint that is usually narrower than its
//! sprite, which keeps near misses feeling fair. Footprints never rotate, even
//! when the rider leans.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle described by its center and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub center: Vec2,
    /// Always non-negative on both axes
    size: Vec2,
}

impl Footprint {
    /// Build a footprint centered on `center`. Negative sizes collapse to zero.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size: size.max(Vec2::ZERO),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Move the footprint without changing its size
    pub fn recenter(&mut self, center: Vec2) {
        self.center = center;
    }

    /// Separating-axis test on both extents. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether a point lies inside (edges inclusive on the top-left)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}
