use eframe::egui::{Color32, Pos2, Rect, Stroke, pos2};

use crate::annotation::{AnnotationEngine, CoordinateMapper, Geometry, Point};
use crate::config::constants::annotation::HANDLE_MARKER_RADIUS_PX;
use crate::config::plot::PLOT_CONFIG;

/// One polyline to stroke, in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    pub points: Vec<Pos2>,
    pub stroke: Stroke,
    pub dashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMarker {
    pub center: Pos2,
    pub radius: f32,
    pub fill: Color32,
    pub outline: Stroke,
}

/// Everything a painter needs for one frame of annotations. Paths are
/// clipped to `clip_rect` by the painter, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub clip_rect: Rect,
    pub shapes: Vec<StrokePath>,
    pub handles: Vec<HandleMarker>,
    pub preview: Vec<StrokePath>,
}

impl RenderFrame {
    pub fn new(clip_rect: Rect) -> Self {
        Self {
            clip_rect,
            shapes: Vec::new(),
            handles: Vec::new(),
            preview: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.handles.is_empty() && self.preview.is_empty()
    }
}

impl<M: CoordinateMapper> AnnotationEngine<M> {
    /// Builds the frame from current state. Shapes that cannot be mapped are
    /// skipped, which is normal while they are off screen.
    pub fn render(&self) -> RenderFrame {
        let mapper = self.mapper();
        let mut frame = RenderFrame::new(mapper.pane());

        for shape in self.shapes() {
            frame
                .shapes
                .extend(geometry_paths(mapper, &shape.geometry, shape.style.stroke(), false));
        }

        if let Some(shape) = self.selected_id().and_then(|id| self.shape(id)) {
            let outline = Stroke::new(
                PLOT_CONFIG.handle_outline_width,
                PLOT_CONFIG.handle_outline_color,
            );
            frame.handles = self
                .handle_positions(shape)
                .into_iter()
                .flatten()
                .map(|center| HandleMarker {
                    center,
                    radius: HANDLE_MARKER_RADIUS_PX,
                    fill: PLOT_CONFIG.handle_fill_color,
                    outline,
                })
                .collect();
        }

        if let Some(preview) = self.preview() {
            let stroke = Stroke::new(PLOT_CONFIG.annotation_line_width, PLOT_CONFIG.preview_color);
            frame.preview = geometry_paths(mapper, &preview, stroke, true);
        }

        frame
    }
}

/// Screen paths for one geometry. Empty when any required coordinate is
/// unmappable.
pub(crate) fn geometry_paths<M: CoordinateMapper>(
    mapper: &M,
    geometry: &Geometry,
    stroke: Stroke,
    dashed: bool,
) -> Vec<StrokePath> {
    let pane = mapper.pane();
    let path = |points: Vec<Pos2>| StrokePath {
        points,
        stroke,
        dashed,
    };
    let segment = |a: Point, b: Point| -> Option<StrokePath> {
        Some(path(vec![mapper.point_to_screen(a)?, mapper.point_to_screen(b)?]))
    };

    match geometry {
        Geometry::HorizontalLine(h) => mapper
            .price_to_y(h.price)
            .map(|y| path(vec![pos2(pane.left(), y), pos2(pane.right(), y)]))
            .into_iter()
            .collect(),
        Geometry::VerticalLine(v) => mapper
            .logical_to_x(v.logical_index)
            .map(|x| path(vec![pos2(x, pane.top()), pos2(x, pane.bottom())]))
            .into_iter()
            .collect(),
        Geometry::TrendLine(t) => segment(t.p1, t.p2).into_iter().collect(),
        Geometry::Channel(ch) => {
            let (r1, r2) = ch.parallel_rail();
            [segment(ch.p1, ch.p2), segment(r1, r2)]
                .into_iter()
                .flatten()
                .collect()
        }
    }
}
