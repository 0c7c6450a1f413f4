use std::mem;

use eframe::egui::{Pos2, pos2};

#[cfg(debug_assertions)]
use crate::config::DF;
use crate::{
    annotation::{
        Channel, ChannelAnchor, CoordinateMapper, Geometry, History, HorizontalLine, Point, Shape,
        ShapeStyle, TrendLine, VerticalLine, geometry::distance_to_segment,
    },
    config::{
        DrawingMode, ShapeKind,
        constants::annotation::{HANDLE_RADIUS_PX, HIT_THRESHOLD_PX},
    },
};

/// An in-progress handle drag.
#[derive(Debug, Clone)]
struct DragState {
    shape_id: String,
    handle: usize,
    /// Channel anchor at drag start; baseline endpoint drags keep it fixed.
    anchor: Option<ChannelAnchor>,
    /// Pre-drag snapshot, committed to history on the first real change.
    before: Option<Vec<Shape>>,
}

/// Owns every annotation of one chart along with the interaction state
/// around them: drawing mode, pending clicks, selection, hover, drag and
/// undo/redo history.
///
/// Pointer positions are screen pixels; the injected mapper turns them into
/// chart coordinates.
pub struct AnnotationEngine<M> {
    mapper: M,
    shapes: Vec<Shape>,
    mode: DrawingMode,
    pending: Vec<Point>,
    cursor: Option<Pos2>,
    selected: Option<String>,
    hovered: Option<String>,
    drag: Option<DragState>,
    history: History<Vec<Shape>>,
    counters: [u32; 4],
}

impl<M: Default> Default for AnnotationEngine<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M> AnnotationEngine<M> {
    pub fn new(mapper: M) -> Self {
        Self {
            mapper,
            shapes: Vec::new(),
            mode: DrawingMode::None,
            pending: Vec::new(),
            cursor: None,
            selected: None,
            hovered: None,
            drag: None,
            history: History::default(),
            counters: [0; 4],
        }
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Hosts refresh the mapping here whenever the chart is re-laid out.
    pub fn mapper_mut(&mut self) -> &mut M {
        &mut self.mapper
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn drawing_mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn pending_points(&self) -> &[Point] {
        &self.pending
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// While true the host must keep its own pan/zoom gesture suspended.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub(crate) fn cursor(&self) -> Option<Pos2> {
        self.cursor
    }

    /// Switching modes drops pending clicks and the current selection.
    pub fn set_drawing_mode(&mut self, mode: DrawingMode) {
        self.pending.clear();
        self.selected = None;
        self.drag = None;
        self.mode = mode;
    }

    pub fn select_shape(&mut self, id: &str) -> bool {
        if self.shape(id).is_none() {
            return false;
        }
        self.mode = DrawingMode::None;
        self.pending.clear();
        self.selected = Some(id.to_owned());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Ends any drag. Returns whether one was in progress, so the host knows
    /// to restore chart pan/zoom.
    pub fn on_pointer_up(&mut self) -> bool {
        match self.drag.take() {
            Some(_drag) => {
                #[cfg(debug_assertions)]
                if DF.log_annotations {
                    log::info!("Drag of {} handle {} ended", _drag.shape_id, _drag.handle);
                }
                true
            }
            None => false,
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.hovered = None;
    }

    pub fn delete_shape(&mut self, id: &str) -> bool {
        let Some(idx) = self.shapes.iter().position(|s| s.id == id) else {
            return false;
        };

        self.history.record(self.shapes.clone());
        let _removed = self.shapes.remove(idx);
        #[cfg(debug_assertions)]
        if DF.log_annotations {
            log::info!("Shape deleted: {}", _removed.id);
        }
        self.prune_dangling_ids();
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected.clone() {
            Some(id) => self.delete_shape(&id),
            None => false,
        }
    }

    /// Clearing an empty collection records nothing.
    pub fn clear_all(&mut self) -> bool {
        if self.shapes.is_empty() {
            return false;
        }

        let before = mem::take(&mut self.shapes);
        #[cfg(debug_assertions)]
        if DF.log_annotations {
            log::info!("Cleared {} shapes", before.len());
        }
        self.history.record(before);
        self.prune_dangling_ids();
        true
    }

    pub fn undo(&mut self) -> bool {
        self.drag = None;
        let restored = self.history.undo(&mut self.shapes);
        if restored {
            self.prune_dangling_ids();
        }
        restored
    }

    pub fn redo(&mut self) -> bool {
        self.drag = None;
        let restored = self.history.redo(&mut self.shapes);
        if restored {
            self.prune_dangling_ids();
        }
        restored
    }

    fn prune_dangling_ids(&mut self) {
        let exists = |id: &Option<String>, shapes: &[Shape]| {
            id.as_ref()
                .is_some_and(|id| shapes.iter().any(|s| &s.id == id))
        };
        if !exists(&self.selected, &self.shapes) {
            self.selected = None;
        }
        if !exists(&self.hovered, &self.shapes) {
            self.hovered = None;
        }
        let drag_alive = self
            .drag
            .as_ref()
            .is_none_or(|d| self.shapes.iter().any(|s| s.id == d.shape_id));
        if !drag_alive {
            self.drag = None;
        }
    }

    fn commit_pending(&mut self, kind: ShapeKind) {
        let points = mem::take(&mut self.pending);
        self.mode = DrawingMode::None;

        let Some(geometry) = Geometry::from_points(kind, &points) else {
            return;
        };

        self.history.record(self.shapes.clone());

        let slot = kind.counter_slot();
        self.counters[slot] += 1;
        let id = format!("{} {}", kind, self.counters[slot]);

        #[cfg(debug_assertions)]
        if DF.log_annotations {
            log::info!("Shape added: {}", id);
        }

        self.shapes.push(Shape {
            id,
            style: ShapeStyle::for_kind(kind),
            geometry,
        });
    }
}

impl<M: CoordinateMapper> AnnotationEngine<M> {
    /// In a drawing mode: adds a point and completes the shape once enough
    /// clicks are in. Otherwise: selects the nearest shape, or deselects.
    pub fn on_click(&mut self, pos: Pos2) {
        if self.drag.is_some() {
            return;
        }

        let Some(kind) = self.mode.shape_kind() else {
            self.selected = self.hit_test(pos).map(str::to_owned);
            #[cfg(debug_assertions)]
            if DF.log_annotations {
                log::info!("Selection: {:?}", self.selected);
            }
            return;
        };

        // Off-chart clicks cannot be placed
        let Some(point) = self.mapper.screen_to_point(pos) else {
            return;
        };

        self.pending.push(point);
        if self.pending.len() >= kind.clicks_required() {
            self.commit_pending(kind);
        }
    }

    /// Starts a drag when `pos` is on a handle of the selected shape.
    /// Returns `true` when a drag began.
    pub fn on_pointer_down(&mut self, pos: Pos2) -> bool {
        if self.drag.is_some() || self.mode != DrawingMode::None {
            return false;
        }
        let Some(id) = self.selected.clone() else {
            return false;
        };
        let Some(shape) = self.shape(&id) else {
            return false;
        };

        let handle = self
            .handle_positions(shape)
            .into_iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (i, p.distance(pos))))
            .filter(|(_, d)| *d <= HANDLE_RADIUS_PX)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);
        let Some(handle) = handle else {
            return false;
        };

        let anchor = match &shape.geometry {
            Geometry::Channel(ch) => Some(ch.anchor()),
            _ => None,
        };

        #[cfg(debug_assertions)]
        if DF.log_annotations {
            log::info!("Drag of {} handle {} started", id, handle);
        }

        self.drag = Some(DragState {
            shape_id: id,
            handle,
            anchor,
            before: Some(self.shapes.clone()),
        });
        true
    }

    /// Live drag update, otherwise hover tracking.
    pub fn on_pointer_move(&mut self, pos: Pos2) {
        self.cursor = Some(pos);

        if self.drag.is_some() {
            self.apply_drag(pos);
            return;
        }

        self.hovered = self.hit_test(pos).map(str::to_owned);
    }

    /// Id of the nearest shape within the hit threshold of `pos`.
    pub fn hit_test(&self, pos: Pos2) -> Option<&str> {
        self.shapes
            .iter()
            .filter_map(|s| self.distance_to(s, pos).map(|d| (s, d)))
            .filter(|(_, d)| *d <= HIT_THRESHOLD_PX)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s.id.as_str())
    }

    /// The pending shape with the cursor standing in for the next click.
    pub fn preview(&self) -> Option<Geometry> {
        let kind = self.mode.shape_kind()?;
        let cursor = self.mapper.screen_to_point(self.cursor?)?;

        match (kind, self.pending.as_slice()) {
            (ShapeKind::TrendLine | ShapeKind::Channel, [p1]) => {
                Some(Geometry::TrendLine(TrendLine { p1: *p1, p2: cursor }))
            }
            (ShapeKind::Channel, [p1, p2]) => {
                Some(Geometry::Channel(Channel::from_clicks(*p1, *p2, cursor)))
            }
            _ => None,
        }
    }

    /// Screen positions of a shape's handles, by handle index. `None` marks a
    /// handle that is off the chart this frame.
    pub(crate) fn handle_positions(&self, shape: &Shape) -> Vec<Option<Pos2>> {
        let pane = self.mapper.pane();
        match &shape.geometry {
            Geometry::HorizontalLine(h) => {
                vec![self.mapper.price_to_y(h.price).map(|y| pos2(pane.center().x, y))]
            }
            Geometry::VerticalLine(v) => vec![
                self.mapper
                    .logical_to_x(v.logical_index)
                    .map(|x| pos2(x, pane.center().y)),
            ],
            Geometry::TrendLine(t) => vec![
                self.mapper.point_to_screen(t.p1),
                self.mapper.point_to_screen(t.p2),
            ],
            Geometry::Channel(ch) => vec![
                self.mapper.point_to_screen(ch.p1),
                self.mapper.point_to_screen(ch.p2),
                self.mapper.point_to_screen(ch.p3),
            ],
        }
    }

    fn distance_to(&self, shape: &Shape, pos: Pos2) -> Option<f32> {
        let segment = |a: Point, b: Point| -> Option<f32> {
            Some(distance_to_segment(
                pos,
                self.mapper.point_to_screen(a)?,
                self.mapper.point_to_screen(b)?,
            ))
        };

        match &shape.geometry {
            Geometry::HorizontalLine(h) => self.mapper.price_to_y(h.price).map(|y| (pos.y - y).abs()),
            Geometry::VerticalLine(v) => self
                .mapper
                .logical_to_x(v.logical_index)
                .map(|x| (pos.x - x).abs()),
            Geometry::TrendLine(t) => segment(t.p1, t.p2),
            Geometry::Channel(ch) => {
                let (r1, r2) = ch.parallel_rail();
                match (segment(ch.p1, ch.p2), segment(r1, r2)) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                }
            }
        }
    }

    fn apply_drag(&mut self, pos: Pos2) {
        let logical = self.mapper.x_to_logical(pos.x);
        let price = self.mapper.y_to_price(pos.y);

        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == drag.shape_id) else {
            self.drag = None;
            return;
        };

        let Some(updated) = dragged_geometry(shape.geometry, drag.handle, drag.anchor, logical, price)
        else {
            return;
        };
        if updated == shape.geometry {
            return;
        }

        if let Some(before) = drag.before.take() {
            self.history.record(before);
        }
        shape.geometry = updated;
    }
}

/// `geometry` with handle `handle` moved to the pointer. `None` when the
/// pointer cannot be converted or the handle does not exist.
fn dragged_geometry(
    geometry: Geometry,
    handle: usize,
    anchor: Option<ChannelAnchor>,
    logical: Option<f64>,
    price: Option<f64>,
) -> Option<Geometry> {
    match geometry {
        Geometry::HorizontalLine(_) => {
            price.map(|price| Geometry::HorizontalLine(HorizontalLine { price }))
        }
        Geometry::VerticalLine(_) => {
            logical.map(|logical_index| Geometry::VerticalLine(VerticalLine { logical_index }))
        }
        Geometry::TrendLine(mut t) => {
            let p = Point::new(logical?, price?);
            match handle {
                0 => t.p1 = p,
                1 => t.p2 = p,
                _ => return None,
            }
            Some(Geometry::TrendLine(t))
        }
        Geometry::Channel(mut ch) => {
            let p = Point::new(logical?, price?);
            let start_anchor = anchor.unwrap_or_else(|| ch.anchor());
            match handle {
                0 => {
                    ch.p1 = p;
                    ch.apply_anchor(start_anchor);
                }
                1 => {
                    ch.p2 = p;
                    ch.apply_anchor(start_anchor);
                }
                2 => {
                    let moved = ChannelAnchor::from_point(ch.p1, ch.p2, p);
                    ch.apply_anchor(moved);
                }
                _ => return None,
            }
            Some(Geometry::Channel(ch))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragging_a_missing_handle_changes_nothing() {
        let t = Geometry::TrendLine(TrendLine {
            p1: Point::new(0.0, 0.0),
            p2: Point::new(1.0, 1.0),
        });
        assert_eq!(dragged_geometry(t, 5, None, Some(2.0), Some(2.0)), None);
    }

    #[test]
    fn horizontal_drag_only_needs_a_price() {
        let h = Geometry::HorizontalLine(HorizontalLine { price: 10.0 });
        assert_eq!(
            dragged_geometry(h, 0, None, None, Some(12.0)),
            Some(Geometry::HorizontalLine(HorizontalLine { price: 12.0 }))
        );
        assert_eq!(dragged_geometry(h, 0, None, Some(1.0), None), None);
    }

    #[test]
    fn third_handle_drag_re_anchors_the_rail() {
        let ch = Channel::from_clicks(
            Point::new(0.0, 100.0),
            Point::new(10.0, 100.0),
            Point::new(5.0, 110.0),
        );
        let moved = dragged_geometry(Geometry::Channel(ch), 2, Some(ch.anchor()), Some(2.0), Some(95.0));
        let Some(Geometry::Channel(moved)) = moved else {
            panic!("expected a channel");
        };
        assert_eq!(moved.p3, Point::new(2.0, 95.0));
        assert_eq!(moved.p1, ch.p1);
    }
}
