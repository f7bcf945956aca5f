//! Plain geometry primitives shared by the carousel and modal layers.
//!
//! These are deliberately renderer-agnostic: the engine computes transforms
//! against these rects and the host maps them onto whatever coordinate
//! system its toolkit uses.

use serde::{Deserialize, Serialize};

/// A point in page coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Center of the rect in page coordinates.
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    /// True when the point lies inside the rect (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left
            && p.x <= self.right()
            && p.y >= self.top
            && p.y <= self.bottom()
    }

    /// True when either dimension is non-positive. Degenerate rects come
    /// from unmeasured layout and must never drive a geometry morph.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_contains() {
        let r = Rect::new(100.0, 200.0, 300.0, 150.0);
        let c = r.center();
        assert!((c.x - 350.0).abs() < f32::EPSILON);
        assert!((c.y - 175.0).abs() < f32::EPSILON);
        assert!(r.contains(c));
        assert!(r.contains(Point::new(200.0, 100.0)));
        assert!(!r.contains(Point::new(199.9, 100.0)));
        assert!(!r.contains(Point::new(350.0, 251.0)));
    }

    #[test]
    fn test_degenerate() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).is_degenerate());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }
}
