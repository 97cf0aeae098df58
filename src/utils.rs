use crate::types::Point;

/// Linear interpolation between two f32 values
pub fn lerp(start: f32, end: f32, alpha: f32) -> f32 {
    start + (end - start) * alpha
}

/// Linear interpolation between two Point values
pub fn lerp_point(start: Point, end: Point, alpha: f32) -> Point {
    Point {
        x: lerp(start.x, end.x, alpha),
        y: lerp(start.y, end.y, alpha),
    }
}

/// Constrain a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
