//! Axis-aligned rectangles
//!
//! Screen space: origin at the top-left, y grows downward. `top` is the
//! smaller y, `bottom` the larger.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle whose bottom edge is centred on `p`
    pub fn from_midbottom(p: Vec2, w: f32, h: f32) -> Self {
        Self::new(p.x - w / 2.0, p.y - h, w, h)
    }

    /// Rectangle centred on `c`
    pub fn from_center(c: Vec2, w: f32, h: f32) -> Self {
        Self::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn centery(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Overlap test; touching edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Copy moved by `(dx, dy)`
    #[inline]
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Copy shrunk by `dx` on the left and right and `dy` on the top and bottom
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        let w = (self.w - 2.0 * dx).max(0.0);
        let h = (self.h - 2.0 * dy).max(0.0);
        Rect::from_center(self.center(), w, h)
    }

    /// Whether `x` lies strictly between the left and right edges
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.left() && x < self.right()
    }
}
