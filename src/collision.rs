//! Axis-aligned bounding box tests used for every collision in the game.

use crate::types::Point;

/// Axis-aligned rectangle in playfield pixels, `x`/`y` being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Aabb { x, y, w, h }
    }

    /// Square box of side `size` with its top-left corner at `pos`.
    pub fn square(pos: Point, size: f32) -> Self {
        Aabb::new(pos.x, pos.y, size, size)
    }

    /// Square box of side `size` centered on `center`.
    pub fn centered(center: Point, size: f32) -> Self {
        Aabb::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    /// Bounding box of a circle.
    pub fn from_circle(center: Point, radius: f32) -> Self {
        Aabb::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// The box scaled about its center. Used to give sprites a tighter hitbox.
    pub fn shrunk(&self, scale: f32) -> Self {
        let w = self.w * scale;
        let h = self.h * scale;
        let x = self.x + (self.w - w) / 2.0;
        let y = self.y + (self.h - h) / 2.0;
        Aabb::new(x, y, w, h)
    }

    /// True if the two boxes share a region of positive area. Touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True if `other` lies entirely inside this box.
    #[cfg(test)]
    pub fn contains(&self, other: &Aabb) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Player (circle) against an enemy square, with the enemy hitbox shrunk by `hitbox_scale`.
pub fn circle_hits_square(center: Point, radius: f32, square: &Aabb, hitbox_scale: f32) -> bool {
    Aabb::from_circle(center, radius)
        .overlaps(&square.shrunk(hitbox_scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_overlap_and_separation() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Aabb::new(2.0, 2.0, 2.0, 2.0))); // Fully inside
        assert!(!a.overlaps(&Aabb::new(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, 10.0, 10.0)));
        assert!(a.overlaps(&Aabb::new(9.99, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let boxes = [
            Aabb::new(0.0, 0.0, 10.0, 10.0),
            Aabb::new(5.0, -3.0, 4.0, 30.0),
            Aabb::new(-20.0, 4.0, 21.0, 1.0),
            Aabb::new(50.0, 50.0, 1.0, 1.0),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.overlaps(b), b.overlaps(a));
            }
        }
    }

    #[test]
    fn test_from_circle() {
        let b = Aabb::from_circle(Point::new(100.0, 50.0), 20.0);
        assert_eq!(b, Aabb::new(80.0, 30.0, 40.0, 40.0));
        assert_eq!(b.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_shrunk_keeps_center() {
        let b = Aabb::new(10.0, 10.0, 30.0, 30.0);
        let s = b.shrunk(0.8);
        assert_approx_eq!(s.w, 24.0);
        assert_approx_eq!(s.h, 24.0);
        assert_approx_eq!(s.center().x, b.center().x);
        assert_approx_eq!(s.center().y, b.center().y);
    }

    #[test]
    fn test_circle_hits_square_respects_hitbox_scale() {
        // Circle bbox spans x in [0, 40]; square starts at x = 38 with size 30
        let square = Aabb::new(38.0, 0.0, 30.0, 30.0);
        let center = Point::new(20.0, 20.0);
        assert!(circle_hits_square(center, 20.0, &square, 1.0));
        // Shrunk to 0.8 the square starts at x = 41, out of reach
        assert!(!circle_hits_square(center, 20.0, &square, 0.8));
    }

    #[test]
    fn test_contains() {
        let screen = Aabb::new(0.0, 0.0, 800.0, 600.0);
        assert!(screen.contains(&Aabb::new(0.0, 0.0, 30.0, 30.0)));
        assert!(screen.contains(&Aabb::new(770.0, 570.0, 30.0, 30.0)));
        assert!(!screen.contains(&Aabb::new(771.0, 0.0, 30.0, 30.0)));
    }
}
