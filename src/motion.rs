//! Linear motion and the edge respawn policy shared by enemies and coins.

use crate::collision::Aabb;
use crate::types::{Direction, Point};
use rand::Rng;

/// Position, velocity and heading of a square that enters from one screen edge
/// and travels toward the opposite one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeMotion {
    pub position: Point, // Top-left corner
    pub prev_position: Point,
    pub velocity: Point, // Pixels per frame before the difficulty multiplier
    pub heading: Direction,
    pub size: f32,
}

impl EdgeMotion {
    /// Pick one of the four edges uniformly and place a square of `size` just
    /// outside it, moving perpendicular toward the opposite edge at `speed`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, size: f32, speed: f32, screen: &Aabb) -> Self {
        let heading = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let max_x = (screen.w - size).max(0.0);
        let max_y = (screen.h - size).max(0.0);
        let position = match heading {
            Direction::Down => Point::new(screen.x + rng.gen_range(0.0..=max_x), screen.y - size),
            Direction::Up => Point::new(screen.x + rng.gen_range(0.0..=max_x), screen.bottom()),
            Direction::Right => Point::new(screen.x - size, screen.y + rng.gen_range(0.0..=max_y)),
            Direction::Left => Point::new(screen.right(), screen.y + rng.gen_range(0.0..=max_y)),
        };
        EdgeMotion {
            position,
            prev_position: position,
            velocity: heading.unit() * speed,
            heading,
            size,
        }
    }

    /// Re-roll edge, offset and heading in place.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, speed: f32, screen: &Aabb) {
        *self = EdgeMotion::spawn(rng, self.size, speed, screen);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.position, self.size)
    }

    /// Advance one frame. `multiplier` is the global difficulty factor.
    pub fn advance(&mut self, multiplier: f32) {
        self.prev_position = self.position;
        self.position = self.position + self.velocity * multiplier;
    }

    /// True once the square has fully crossed the edge it is heading toward.
    pub fn has_exited(&self, screen: &Aabb) -> bool {
        let b = self.bounds();
        match self.heading {
            Direction::Down => b.y > screen.bottom(),
            Direction::Up => b.bottom() < screen.y,
            Direction::Right => b.x > screen.right(),
            Direction::Left => b.right() < screen.x,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn screen() -> Aabb {
        Aabb::new(0.0, 0.0, 800.0, 600.0)
    }

    #[test]
    fn test_spawn_is_outside_an_edge_and_heads_inward() {
        let mut rng = StdRng::seed_from_u64(7);
        let screen = screen();
        for _ in 0..500 {
            let m = EdgeMotion::spawn(&mut rng, 30.0, 3.0, &screen);
            let b = m.bounds();
            assert!(!b.overlaps(&screen), "spawned inside the screen: {:?}", b);
            match m.heading {
                Direction::Down => {
                    assert_approx_eq!(b.bottom(), 0.0);
                    assert!(b.x >= 0.0 && b.right() <= 800.0);
                }
                Direction::Up => {
                    assert_approx_eq!(b.y, 600.0);
                    assert!(b.x >= 0.0 && b.right() <= 800.0);
                }
                Direction::Right => {
                    assert_approx_eq!(b.right(), 0.0);
                    assert!(b.y >= 0.0 && b.bottom() <= 600.0);
                }
                Direction::Left => {
                    assert_approx_eq!(b.x, 800.0);
                    assert!(b.y >= 0.0 && b.bottom() <= 600.0);
                }
            }
            assert_approx_eq!(m.speed(), 3.0);
        }
    }

    #[test]
    fn test_spawn_uses_every_edge() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let m = EdgeMotion::spawn(&mut rng, 30.0, 3.0, &screen());
            let idx = Direction::ALL.iter().position(|d| *d == m.heading).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_spawned_square_enters_fully_within_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let screen = screen();
        for _ in 0..200 {
            let mut m = EdgeMotion::spawn(&mut rng, 30.0, 3.0, &screen);
            // 30px at 3px/frame: fully inside after 10 frames
            for _ in 0..10 {
                m.advance(1.0);
            }
            let b = m.bounds();
            assert!(screen.contains(&b), "not inside: {:?}", b);
            assert!(!m.has_exited(&screen));
        }
    }

    #[test]
    fn test_has_exited_only_past_the_far_edge() {
        let screen = screen();
        let mut m = EdgeMotion {
            position: Point::new(100.0, 560.0),
            prev_position: Point::new(100.0, 560.0),
            velocity: Point::new(0.0, 3.0),
            heading: Direction::Down,
            size: 30.0,
        };
        assert!(!m.has_exited(&screen));
        m.position.y = 600.0;
        assert!(!m.has_exited(&screen)); // Touching the edge from outside
        m.position.y = 600.5;
        assert!(m.has_exited(&screen));

        // Heading up from below the screen is not an exit
        m.heading = Direction::Up;
        m.velocity = Point::new(0.0, -3.0);
        assert!(!m.has_exited(&screen));
    }

    #[test]
    fn test_advance_applies_multiplier_and_tracks_previous() {
        let mut m = EdgeMotion {
            position: Point::new(0.0, 0.0),
            prev_position: Point::new(0.0, 0.0),
            velocity: Point::new(3.0, 0.0),
            heading: Direction::Right,
            size: 30.0,
        };
        m.advance(2.0);
        assert_approx_eq!(m.position.x, 6.0);
        assert_approx_eq!(m.prev_position.x, 0.0);
        m.advance(1.0);
        assert_approx_eq!(m.position.x, 9.0);
        assert_approx_eq!(m.prev_position.x, 6.0);
    }

    #[test]
    fn test_respawn_after_exit_returns_to_an_edge() {
        let mut rng = StdRng::seed_from_u64(99);
        let screen = screen();
        let mut m = EdgeMotion::spawn(&mut rng, 30.0, 3.0, &screen);
        m.position = Point::new(5000.0, 5000.0);
        m.heading = Direction::Right;
        assert!(m.has_exited(&screen));
        m.respawn(&mut rng, 4.0, &screen);
        assert!(!m.has_exited(&screen));
        assert_approx_eq!(m.speed(), 4.0);
        assert_approx_eq!(m.size, 30.0);
    }
}
