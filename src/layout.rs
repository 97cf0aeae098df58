//! Placement of the scaled playfield and the two side panels inside the window.

use crate::collision::Aabb;
use crate::config::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, SIDE_PANEL_WIDTH};
use crate::types::Point;

const MIN_SCALE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub scale: f32,
    pub playfield: Aabb, // Screen pixels
    pub left_panel: Aabb,
    pub right_panel: Aabb,
}

impl Layout {
    /// Scale the playfield as large as possible while leaving at least
    /// `SIDE_PANEL_WIDTH` on each side, then center it. Panels take the rest of the width.
    pub fn compute(screen_width: f32, screen_height: f32) -> Self {
        let by_height = screen_height / PLAYFIELD_HEIGHT;
        let by_width = (screen_width - 2.0 * SIDE_PANEL_WIDTH) / PLAYFIELD_WIDTH;
        let scale = by_height.min(by_width).max(MIN_SCALE);

        let w = PLAYFIELD_WIDTH * scale;
        let h = PLAYFIELD_HEIGHT * scale;
        let x = ((screen_width - w) / 2.0).max(0.0);
        let y = ((screen_height - h) / 2.0).max(0.0);
        let right_w = (screen_width - x - w).max(0.0);

        Layout {
            scale,
            playfield: Aabb::new(x, y, w, h),
            left_panel: Aabb::new(0.0, 0.0, x, screen_height),
            right_panel: Aabb::new(x + w, 0.0, right_w, screen_height),
        }
    }

    /// Playfield coordinates to screen coordinates.
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            self.playfield.x + p.x * self.scale,
            self.playfield.y + p.y * self.scale,
        )
    }

    /// Playfield length to screen length.
    pub fn scaled(&self, l: f32) -> f32 {
        l * self.scale
    }
}
