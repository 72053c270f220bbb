//! Axis-aligned bounding boxes and overlap tests

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_detected() {
        let player = Rect::new(100.0, 220.0, 60.0, 100.0);
        let obstacle = Rect::new(120.0, 250.0, 80.0, 40.0);
        assert!(player.overlaps(&obstacle));
        assert!(obstacle.overlaps(&player));
    }

    #[test]
    fn test_edge_touching_is_not_collision() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the right edge
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        // Shares the bottom edge
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Shares only a corner
        assert!(!a.overlaps(&Rect::new(10.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn test_overlap_on_one_axis_only() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(5.0, 20.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(20.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert_eq!(outer.center(), Vec2::new(50.0, 50.0));
    }
}
