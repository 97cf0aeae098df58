use std::ops::{Add, Mul, Sub};

/// A position or velocity in playfield pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle of this vector in degrees, 0 pointing right and growing clockwise (screen y is down).
    pub fn angle_degrees(&self) -> f32 {
        self.y.atan2(self.x).to_degrees().rem_euclid(360.0)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Heading of an edge-spawned entity: the direction it travels across the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    /// Unit vector for this heading.
    pub fn unit(self) -> Point {
        match self {
            Direction::Down => Point::new(0.0, 1.0),
            Direction::Up => Point::new(0.0, -1.0),
            Direction::Right => Point::new(1.0, 0.0),
            Direction::Left => Point::new(-1.0, 0.0),
        }
    }
}

/// Things that happened during a frame, consumed by the audio and particle layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    CoinCollected { at: Point },
    AmmoCollected { at: Point },
    EnemyKilled { at: Point },
    PlayerHit { lives_left: u32 },
    ExtraLife { lives: u32 },
    LevelComplete { level: u32 },
    PlayerDied { at: Point },
    GameOver { score: u32, rank: Option<usize> },
    Purchased { price: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(b - a, Point::new(2.0, -3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_approx_eq!(Point::new(3.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_angle_degrees() {
        assert_approx_eq!(Point::new(1.0, 0.0).angle_degrees(), 0.0, 1e-3);
        assert_approx_eq!(Point::new(0.0, 1.0).angle_degrees(), 90.0, 1e-3);
        assert_approx_eq!(Point::new(-1.0, 0.0).angle_degrees(), 180.0, 1e-3);
        assert_approx_eq!(Point::new(0.0, -1.0).angle_degrees(), 270.0, 1e-3);
    }

    #[test]
    fn test_direction_units_are_axis_aligned() {
        for dir in Direction::ALL {
            let u = dir.unit();
            assert_approx_eq!(u.length(), 1.0);
            assert!(u.x == 0.0 || u.y == 0.0);
        }
    }
}
