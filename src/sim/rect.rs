//! Axis-aligned rectangle geometry
//!
//! Every entity's footprint is a `Rect`. Screen space: origin top-left,
//! y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as top-left corner + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0, "rect size must be positive");
        Self { x, y, w, h }
    }

    /// Square of side `size` centred on `center`
    pub fn square_at(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
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

    /// Centre of the bottom edge
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.bottom())
    }

    /// Move so the bottom edge sits at `y`
    pub fn set_bottom(&mut self, y: f32) {
        self.y = y - self.h;
    }

    /// Strict overlap test. Rects that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Horizontal overlap only (ignores vertical position)
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Shift this rect so it lies inside `bounds` (no resizing)
    pub fn clamp_within(&mut self, bounds: &Rect) {
        self.x = self.x.clamp(bounds.left(), (bounds.right() - self.w).max(bounds.left()));
        self.y = self.y.clamp(bounds.top(), (bounds.bottom() - self.h).max(bounds.top()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 40.0, 30.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 50.0);
        assert_eq!(r.center(), Vec2::new(30.0, 35.0));
        assert_eq!(r.bottom_center(), Vec2::new(30.0, 50.0));
    }

    #[test]
    fn test_square_at_is_centered() {
        let r = Rect::square_at(Vec2::new(100.0, 100.0), 30.0);
        assert_eq!(r.center(), Vec2::new(100.0, 100.0));
        assert_eq!(r.left(), 85.0);
        assert_eq!(r.bottom(), 115.0);
    }

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let beside = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&beside));
    }

    #[test]
    fn test_clamp_within() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut r = Rect::new(-5.0, 95.0, 10.0, 10.0);
        r.clamp_within(&bounds);
        assert_eq!(r.left(), 0.0);
        assert_eq!(r.bottom(), 100.0);
    }

    #[test]
    fn test_set_bottom() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 40.0);
        r.set_bottom(500.0);
        assert_eq!(r.top(), 460.0);
        assert_eq!(r.bottom(), 500.0);
    }
}
