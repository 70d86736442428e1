//! Orthographic projection from world units onto a grid of terminal cells.
//!
//! The camera always frames the same world rectangle, centered on the
//! origin, and stretches it over whatever area it is given. World y grows
//! upward, rows grow downward.

use crate::constants::{VIEW_HALF_HEIGHT, VIEW_HALF_WIDTH};
use crate::geometry::{Aabb, Vec2};
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub area: Rect,
    pub half_width: f64,
    pub half_height: f64,
}

impl Camera {
    pub fn new(area: Rect) -> Self {
        Self::with_view(area, VIEW_HALF_WIDTH, VIEW_HALF_HEIGHT)
    }

    pub fn with_view(area: Rect, half_width: f64, half_height: f64) -> Self {
        Self {
            area,
            half_width,
            half_height,
        }
    }

    /// Columns per world unit.
    pub fn scale_x(&self) -> f64 {
        self.area.width as f64 / (2.0 * self.half_width)
    }

    /// Rows per world unit.
    pub fn scale_y(&self) -> f64 {
        self.area.height as f64 / (2.0 * self.half_height)
    }

    fn col_of(&self, x: f64) -> f64 {
        (x + self.half_width) * self.scale_x()
    }

    fn row_of(&self, y: f64) -> f64 {
        (self.half_height - y) * self.scale_y()
    }

    /// Cell containing `p`, or `None` outside the view. Points on the far
    /// edges of the view map to the last row/column.
    pub fn world_to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if self.area.width == 0 || self.area.height == 0 {
            return None;
        }
        if p.x.abs() > self.half_width || p.y.abs() > self.half_height {
            return None;
        }
        let col = (self.col_of(p.x).floor() as u16).min(self.area.width - 1);
        let row = (self.row_of(p.y).floor() as u16).min(self.area.height - 1);
        Some((self.area.x + col, self.area.y + row))
    }

    /// Cells covered by `b`, clipped to the area. `None` if nothing is visible.
    pub fn project_box(&self, b: &Aabb) -> Option<Rect> {
        let w = self.area.width as f64;
        let h = self.area.height as f64;

        let col0 = self.col_of(b.min.x).floor().clamp(0.0, w);
        let col1 = self.col_of(b.max.x).ceil().clamp(0.0, w);
        let row0 = self.row_of(b.max.y).floor().clamp(0.0, h);
        let row1 = self.row_of(b.min.y).ceil().clamp(0.0, h);

        if col1 <= col0 || row1 <= row0 {
            return None;
        }

        Some(Rect::new(
            self.area.x + col0 as u16,
            self.area.y + row0 as u16,
            (col1 - col0) as u16,
            (row1 - row0) as u16,
        ))
    }
}
