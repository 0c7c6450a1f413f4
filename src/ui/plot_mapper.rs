use eframe::egui::{Pos2, Rect, pos2};
use egui_plot::PlotTransform;

use crate::annotation::CoordinateMapper;

/// Maps annotation coordinates through the price plot's last transform.
///
/// The x axis of the price plot is the bar index, so a logical index maps
/// straight to plot x. Until the plot has been shown once there is no
/// transform and every conversion is `None`.
#[derive(Default)]
pub struct PlotMapper {
    transform: Option<PlotTransform>,
}

impl PlotMapper {
    pub fn set_transform(&mut self, transform: PlotTransform) {
        self.transform = Some(transform);
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.transform
            .as_ref()
            .is_some_and(|t| t.frame().contains(pos))
    }
}

fn finite(v: f32) -> Option<f32> {
    v.is_finite().then_some(v)
}

impl CoordinateMapper for PlotMapper {
    fn price_to_y(&self, price: f64) -> Option<f32> {
        let t = self.transform.as_ref()?;
        if !price.is_finite() {
            return None;
        }
        finite(t.position_from_point_y(price))
    }

    fn y_to_price(&self, y: f32) -> Option<f64> {
        let t = self.transform.as_ref()?;
        let frame = t.frame();
        if !(frame.top()..=frame.bottom()).contains(&y) {
            return None;
        }
        Some(t.value_from_position(pos2(frame.center().x, y)).y)
    }

    fn logical_to_x(&self, logical_index: f64) -> Option<f32> {
        let t = self.transform.as_ref()?;
        if !logical_index.is_finite() {
            return None;
        }
        finite(t.position_from_point_x(logical_index))
    }

    fn x_to_logical(&self, x: f32) -> Option<f64> {
        let t = self.transform.as_ref()?;
        let frame = t.frame();
        if !(frame.left()..=frame.right()).contains(&x) {
            return None;
        }
        Some(t.value_from_position(pos2(x, frame.center().y)).x)
    }

    fn pane(&self) -> Rect {
        self.transform
            .as_ref()
            .map_or(Rect::NOTHING, |t| *t.frame())
    }
}
