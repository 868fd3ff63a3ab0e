//! Screen-space geometry primitives
//!
//! Screen coordinates: x grows right, y grows down, origin at the top-left.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square bounding box of a circle
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True if `inner` lies entirely inside this rectangle (edges inclusive)
    pub fn contains_rect(&self, inner: &Rect) -> bool {
        inner.x >= self.x
            && inner.right() <= self.right()
            && inner.y >= self.y
            && inner.bottom() <= self.bottom()
    }

    /// The four corners, clockwise from top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.x, self.bottom()),
        ]
    }

    pub fn translate_x(&mut self, dx: f32) {
        self.x += dx;
    }
}

/// A filled triangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub const fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Point-in-triangle by edge sign tests (edges inclusive)
    ///
    /// Degenerate triangles contain nothing.
    pub fn contains_point(&self, p: Vec2) -> bool {
        let area = cross(self.b - self.a, self.c - self.a);
        if area.abs() < f32::EPSILON {
            return false;
        }

        let d1 = cross(self.b - self.a, p - self.a);
        let d2 = cross(self.c - self.b, p - self.b);
        let d3 = cross(self.a - self.c, p - self.c);

        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }

    /// Approximate rect overlap: true if any rect corner is inside the triangle.
    ///
    /// A triangle tip poking through a rect edge without covering a corner is missed.
    pub fn touches_rect_corner(&self, rect: &Rect) -> bool {
        rect.corners().iter().any(|&p| self.contains_point(p))
    }

    pub fn min_x(&self) -> f32 {
        self.a.x.min(self.b.x).min(self.c.x)
    }

    pub fn max_x(&self) -> f32 {
        self.a.x.max(self.b.x).max(self.c.x)
    }

    pub fn translate_x(&mut self, dx: f32) {
        let d = Vec2::new(dx, 0.0);
        self.a += d;
        self.b += d;
        self.c += d;
    }
}

#[inline]
fn cross(u: Vec2, v: Vec2) -> f32 {
    u.x * v.y - u.y * v.x
}
