//! Rectangle and vector helpers shared by every system
//!
//! Entities are axis-aligned rectangles anchored at their top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Clamp without the `min <= max` assertion of `f32::clamp`.
///
/// Lower bound wins when the range is inverted.
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// Unit vector from `from` toward `to` plus the distance between them.
///
/// Coincident points yield a zero direction and distance 1 so callers never
/// divide by zero.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let len = delta.length();
    let dist = if len > 0.0 { len } else { 1.0 };
    (delta / dist, dist)
}

/// Current playfield size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::base()
    }
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The base 700x450 arena
    pub fn base() -> Self {
        Self::new(crate::consts::BASE_WORLD_WIDTH, crate::consts::BASE_WORLD_HEIGHT)
    }

    /// Clamp a top-left position so a body of `size` stays fully inside.
    pub fn clamp_position(&self, pos: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            clamp(pos.x, 0.0, self.width - size.x),
            clamp(pos.y, 0.0, self.height - size.y),
        )
    }

    /// True if a body of `size` at `pos` lies fully inside the bounds
    pub fn contains(&self, pos: Vec2, size: Vec2) -> bool {
        pos.x >= 0.0
            && pos.y >= 0.0
            && pos.x <= self.width - size.x
            && pos.y <= self.height - size.y
    }

    /// Grow in place; never shrinks
    pub fn grow_to(&mut self, width: f32, height: f32) {
        self.width = self.width.max(width);
        self.height = self.height.max(height);
    }
}

/// Axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Overlap test; touching edges count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }
}

/// Separating-axis short circuit on the four sides.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.pos.x + a.size.x < b.pos.x
        || a.pos.x > b.pos.x + b.size.x
        || a.pos.y + a.size.y < b.pos.y
        || a.pos.y > b.pos.y + b.size.y)
}
