use eframe::egui::{Color32, Stroke};

use crate::config::{ShapeKind, plot::PLOT_CONFIG};
use crate::utils::{lerp, safe_ratio};

/// A position in chart space: a continuous logical index along the time
/// axis and a price.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub logical_index: f64,
    pub price: f64,
}

impl Point {
    pub fn new(logical_index: f64, price: f64) -> Self {
        Self {
            logical_index,
            price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalLine {
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalLine {
    pub logical_index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub p1: Point,
    pub p2: Point,
}

/// Where the parallel rail of a channel sits relative to its baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelAnchor {
    /// Logical position between p1 (0.0) and p2 (1.0). Always in [0, 1].
    pub ratio: f64,
    /// Price distance from the baseline at `ratio`.
    pub offset: f64,
}

impl ChannelAnchor {
    /// Derives the anchor of `point` against the baseline `p1`-`p2`. The
    /// ratio is clamped so dragging an endpoint past the other cannot make
    /// the rail extrapolate.
    pub fn from_point(p1: Point, p2: Point, point: Point) -> Self {
        let ratio = safe_ratio(
            point.logical_index - p1.logical_index,
            p2.logical_index - p1.logical_index,
        )
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
        let baseline = lerp(p1.price, p2.price, ratio);

        Self {
            ratio,
            offset: point.price - baseline,
        }
    }
}

/// Baseline p1-p2 plus a parallel rail through p3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl Channel {
    /// Builds a channel from three clicks. The third click is reduced to an
    /// anchor, so the stored p3 may sit at a clamped logical position.
    pub fn from_clicks(p1: Point, p2: Point, third: Point) -> Self {
        let mut channel = Self { p1, p2, p3: third };
        channel.apply_anchor(ChannelAnchor::from_point(p1, p2, third));
        channel
    }

    pub fn anchor(&self) -> ChannelAnchor {
        ChannelAnchor::from_point(self.p1, self.p2, self.p3)
    }

    /// Re-places p3 from `anchor` against the current baseline.
    pub fn apply_anchor(&mut self, anchor: ChannelAnchor) {
        let logical_index = lerp(self.p1.logical_index, self.p2.logical_index, anchor.ratio);
        let price = lerp(self.p1.price, self.p2.price, anchor.ratio) + anchor.offset;
        self.p3 = Point::new(logical_index, price);
    }

    /// The rail parallel to the baseline, spanning the same logical range.
    pub fn parallel_rail(&self) -> (Point, Point) {
        let offset = self.anchor().offset;
        (
            Point::new(self.p1.logical_index, self.p1.price + offset),
            Point::new(self.p2.logical_index, self.p2.price + offset),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    HorizontalLine(HorizontalLine),
    VerticalLine(VerticalLine),
    TrendLine(TrendLine),
    Channel(Channel),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::HorizontalLine(_) => ShapeKind::HorizontalLine,
            Self::VerticalLine(_) => ShapeKind::VerticalLine,
            Self::TrendLine(_) => ShapeKind::TrendLine,
            Self::Channel(_) => ShapeKind::Channel,
        }
    }

    /// Builds the geometry of `kind` from exactly `kind.clicks_required()`
    /// points.
    pub(crate) fn from_points(kind: ShapeKind, points: &[Point]) -> Option<Self> {
        match (kind, points) {
            (ShapeKind::HorizontalLine, [p]) => {
                Some(Self::HorizontalLine(HorizontalLine { price: p.price }))
            }
            (ShapeKind::VerticalLine, [p]) => Some(Self::VerticalLine(VerticalLine {
                logical_index: p.logical_index,
            })),
            (ShapeKind::TrendLine, [p1, p2]) => Some(Self::TrendLine(TrendLine { p1: *p1, p2: *p2 })),
            (ShapeKind::Channel, [p1, p2, p3]) => {
                Some(Self::Channel(Channel::from_clicks(*p1, *p2, *p3)))
            }
            _ => None,
        }
    }

    pub fn handle_count(&self) -> usize {
        match self {
            Self::HorizontalLine(_) | Self::VerticalLine(_) => 1,
            Self::TrendLine(_) => 2,
            Self::Channel(_) => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub color: Color32,
    pub width: f32,
}

impl ShapeStyle {
    pub fn for_kind(kind: ShapeKind) -> Self {
        Self {
            color: PLOT_CONFIG.shape_color(kind),
            width: PLOT_CONFIG.annotation_line_width,
        }
    }

    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.width, self.color)
    }
}

/// A persisted annotation. `id` is human readable and unique per session.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: String,
    pub style: ShapeStyle,
    pub geometry: Geometry,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn third_click_becomes_ratio_and_offset() {
        let ch = Channel::from_clicks(
            Point::new(10.0, 100.0),
            Point::new(50.0, 140.0),
            Point::new(30.0, 130.0),
        );
        let anchor = ch.anchor();
        assert_relative_eq!(anchor.ratio, 0.5, epsilon = 1e-12);
        assert_relative_eq!(anchor.offset, 10.0, epsilon = 1e-12);
        assert_eq!(ch.p3, Point::new(30.0, 130.0));
    }

    #[test]
    fn third_click_outside_the_baseline_is_clamped() {
        let ch = Channel::from_clicks(
            Point::new(10.0, 100.0),
            Point::new(50.0, 140.0),
            Point::new(90.0, 150.0),
        );
        // pinned to p2's end, offset measured there
        assert_eq!(ch.p3.logical_index, 50.0);
        assert_relative_eq!(ch.anchor().offset, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn vertical_baseline_falls_back_to_p1() {
        let anchor = ChannelAnchor::from_point(
            Point::new(20.0, 100.0),
            Point::new(20.0, 120.0),
            Point::new(25.0, 90.0),
        );
        assert_eq!(anchor.ratio, 0.0);
        assert_eq!(anchor.offset, -10.0);
    }

    #[test]
    fn rail_runs_parallel_to_the_baseline() {
        let ch = Channel::from_clicks(
            Point::new(0.0, 10.0),
            Point::new(10.0, 20.0),
            Point::new(5.0, 10.0),
        );
        let (r1, r2) = ch.parallel_rail();
        assert_relative_eq!(r1.price, 5.0, epsilon = 1e-12);
        assert_relative_eq!(r2.price, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn from_points_needs_the_exact_click_count() {
        let p = Point::new(1.0, 2.0);
        assert!(Geometry::from_points(ShapeKind::TrendLine, &[p]).is_none());
        assert_eq!(
            Geometry::from_points(ShapeKind::HorizontalLine, &[p]),
            Some(Geometry::HorizontalLine(HorizontalLine { price: 2.0 }))
        );
        assert_eq!(
            Geometry::from_points(ShapeKind::VerticalLine, &[p]).map(|g| g.handle_count()),
            Some(1)
        );
    }
}
