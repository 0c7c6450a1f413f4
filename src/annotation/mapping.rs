use eframe::egui::{Pos2, Rect, pos2};

use crate::annotation::Point;
use crate::utils::remap;

/// Converts between chart values and screen pixels.
///
/// Every conversion may return `None` when the value cannot be placed on the
/// currently rendered chart. Callers treat that as "not drawable this frame",
/// never as an error.
pub trait CoordinateMapper {
    fn price_to_y(&self, price: f64) -> Option<f32>;
    fn y_to_price(&self, y: f32) -> Option<f64>;
    fn logical_to_x(&self, logical_index: f64) -> Option<f32>;
    fn x_to_logical(&self, x: f32) -> Option<f64>;

    /// The plotting pane in screen coordinates, axis gutters excluded.
    fn pane(&self) -> Rect;

    fn point_to_screen(&self, point: Point) -> Option<Pos2> {
        Some(pos2(
            self.logical_to_x(point.logical_index)?,
            self.price_to_y(point.price)?,
        ))
    }

    fn screen_to_point(&self, pos: Pos2) -> Option<Point> {
        Some(Point::new(self.x_to_logical(pos.x)?, self.y_to_price(pos.y)?))
    }
}

/// Affine mapping of a logical/price window onto a pane.
///
/// Forward conversions always succeed for finite input; inverse conversions
/// fail for pixels outside the pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMapper {
    pane: Rect,
    logical_range: (f64, f64),
    price_range: (f64, f64),
}

impl LinearMapper {
    pub fn new(pane: Rect, logical_range: (f64, f64), price_range: (f64, f64)) -> Self {
        Self {
            pane,
            logical_range,
            price_range,
        }
    }

    #[cfg(test)]
    pub fn set_ranges(&mut self, logical_range: (f64, f64), price_range: (f64, f64)) {
        self.logical_range = logical_range;
        self.price_range = price_range;
    }

    fn is_degenerate(&self) -> bool {
        let (l0, l1) = self.logical_range;
        let (p0, p1) = self.price_range;
        (l1 - l0).abs() <= f64::EPSILON
            || (p1 - p0).abs() <= f64::EPSILON
            || self.pane.width() <= 0.0
            || self.pane.height() <= 0.0
    }
}

impl CoordinateMapper for LinearMapper {
    fn price_to_y(&self, price: f64) -> Option<f32> {
        if self.is_degenerate() || !price.is_finite() {
            return None;
        }
        // Screen y grows downward, prices grow upward
        let (p0, p1) = self.price_range;
        let y = remap(price, p0, p1, self.pane.bottom() as f64, self.pane.top() as f64);
        Some(y as f32)
    }

    fn y_to_price(&self, y: f32) -> Option<f64> {
        if self.is_degenerate() || !(self.pane.top()..=self.pane.bottom()).contains(&y) {
            return None;
        }
        let (p0, p1) = self.price_range;
        Some(remap(y as f64, self.pane.bottom() as f64, self.pane.top() as f64, p0, p1))
    }

    fn logical_to_x(&self, logical_index: f64) -> Option<f32> {
        if self.is_degenerate() || !logical_index.is_finite() {
            return None;
        }
        let (l0, l1) = self.logical_range;
        let x = remap(logical_index, l0, l1, self.pane.left() as f64, self.pane.right() as f64);
        Some(x as f32)
    }

    fn x_to_logical(&self, x: f32) -> Option<f64> {
        if self.is_degenerate() || !(self.pane.left()..=self.pane.right()).contains(&x) {
            return None;
        }
        let (l0, l1) = self.logical_range;
        Some(remap(x as f64, self.pane.left() as f64, self.pane.right() as f64, l0, l1))
    }

    fn pane(&self) -> Rect {
        self.pane
    }
}
