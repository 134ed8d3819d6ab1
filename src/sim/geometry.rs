//! Axis-aligned bounding boxes
//!
//! Screen convention: y grows downward, so a rect's `top` is its smallest y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
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

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Open-interval overlap on the x axis (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Open-interval overlap on the y axis
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.bottom() > other.top() && self.top() < other.bottom()
    }

    /// Full AABB intersection
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Whether the closed x-span `[min, max]` touches this rect's x-span
    #[inline]
    pub fn spans_x(&self, min: f32, max: f32) -> bool {
        self.right() >= min && self.left() <= max
    }
}

/// Landing test: `body` (moving with vertical velocity `vy`) comes to rest on
/// top of `surface`.
///
/// Requires horizontal overlap, the body's bottom edge within
/// `[surface.top, surface.top + tolerance]`, and a descending or resting body.
pub fn lands_on(body: &Rect, vy: f32, surface: &Rect, tolerance: f32) -> bool {
    let bottom = body.bottom();
    vy >= 0.0
        && body.overlaps_x(surface)
        && bottom >= surface.top()
        && bottom <= surface.top() + tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(
            Rect::from_pos_size(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0)),
            r
        );
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Rect::new(2.0, 2.0, 2.0, 2.0)));
        // Touching edges are not an overlap
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Overlapping on one axis only
        assert!(!a.intersects(&Rect::new(5.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_lands_on_within_tolerance() {
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        let resting = Rect::new(10.0, 60.0, 40.0, 40.0);
        assert!(lands_on(&resting, 0.0, &platform, 30.0));

        let sunk = Rect::new(10.0, 85.0, 40.0, 40.0);
        assert!(lands_on(&sunk, 12.0, &platform, 30.0));

        let too_deep = Rect::new(10.0, 91.0, 40.0, 40.0);
        assert!(!lands_on(&too_deep, 12.0, &platform, 30.0));
    }

    #[test]
    fn test_lands_on_rejects_rising_body() {
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        let body = Rect::new(10.0, 65.0, 40.0, 40.0);
        assert!(!lands_on(&body, -3.0, &platform, 30.0));
    }

    #[test]
    fn test_lands_on_requires_horizontal_overlap() {
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        let beside = Rect::new(100.0, 60.0, 40.0, 40.0);
        assert!(!lands_on(&beside, 1.0, &platform, 30.0));
    }

    #[test]
    fn test_body_above_surface_does_not_land() {
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        let hovering = Rect::new(10.0, 50.0, 40.0, 40.0);
        assert!(!lands_on(&hovering, 2.0, &platform, 30.0));
    }
}
