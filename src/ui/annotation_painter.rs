use eframe::egui::{Painter, Shape};

use crate::annotation::{RenderFrame, StrokePath};
use crate::config::constants::annotation::{PREVIEW_DASH_LENGTH_PX, PREVIEW_GAP_LENGTH_PX};

/// Paints one annotation frame. `painter` should already be clipped to
/// `frame.clip_rect` (see `Ui::painter_at`).
pub(crate) fn paint_annotations(painter: &Painter, frame: &RenderFrame) {
    painter.extend(frame_shapes(frame));
}

/// Paint order: persisted shapes, handle markers, then the preview on top.
fn frame_shapes(frame: &RenderFrame) -> Vec<Shape> {
    let mut shapes = Vec::new();

    for path in &frame.shapes {
        push_path(&mut shapes, path);
    }

    shapes.extend(
        frame
            .handles
            .iter()
            .map(|h| Shape::circle_filled(h.center, h.radius, h.fill)),
    );
    shapes.extend(
        frame
            .handles
            .iter()
            .map(|h| Shape::circle_stroke(h.center, h.radius, h.outline)),
    );

    for path in &frame.preview {
        push_path(&mut shapes, path);
    }

    shapes
}

fn push_path(shapes: &mut Vec<Shape>, path: &StrokePath) {
    if path.points.len() < 2 {
        return;
    }
    if path.dashed {
        shapes.extend(Shape::dashed_line(
            &path.points,
            path.stroke,
            PREVIEW_DASH_LENGTH_PX,
            PREVIEW_GAP_LENGTH_PX,
        ));
    } else {
        shapes.push(Shape::line(path.points.clone(), path.stroke));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::HandleMarker;
    use eframe::egui::{Color32, Rect, Stroke, pos2};

    fn path(dashed: bool) -> StrokePath {
        StrokePath {
            points: vec![pos2(0.0, 0.0), pos2(100.0, 0.0)],
            stroke: Stroke::new(1.0, Color32::WHITE),
            dashed,
        }
    }

    #[test]
    fn preview_is_painted_after_handles() {
        let mut frame = RenderFrame::new(Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)));
        frame.shapes.push(path(false));
        frame.handles.push(HandleMarker {
            center: pos2(50.0, 50.0),
            radius: 5.0,
            fill: Color32::WHITE,
            outline: Stroke::new(1.5, Color32::BLUE),
        });
        frame.preview.push(path(true));

        let shapes = frame_shapes(&frame);
        let last_circle = shapes
            .iter()
            .rposition(|s| matches!(s, Shape::Circle(_)))
            .unwrap();
        let first_preview = last_circle + 1;

        assert!(matches!(shapes[0], Shape::Path(_)));
        assert!(first_preview < shapes.len());
        assert!(shapes[first_preview..]
            .iter()
            .all(|s| matches!(s, Shape::LineSegment { .. })));
    }

    #[test]
    fn single_point_paths_are_skipped() {
        let mut frame = RenderFrame::new(Rect::NOTHING);
        frame.shapes.push(StrokePath {
            points: vec![pos2(1.0, 1.0)],
            stroke: Stroke::NONE,
            dashed: false,
        });
        assert!(frame_shapes(&frame).is_empty());
    }
}
