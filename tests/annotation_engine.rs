use eframe::egui::{Pos2, Rect, pos2};

use pin_chart::annotation::{Geometry, Point, Shape, TrendLine};
use pin_chart::config::DrawingMode;
use pin_chart::{AnnotationEngine, CoordinateMapper};

/// One pixel per logical unit and per price unit, both growing the same way
/// as screen coordinates. Anything outside `pane` is unmappable.
#[derive(Debug, Clone, Copy)]
struct IdentityMapper {
    pane: Rect,
}

impl Default for IdentityMapper {
    fn default() -> Self {
        Self {
            pane: Rect::from_min_max(pos2(0.0, 0.0), pos2(1_000.0, 1_000.0)),
        }
    }
}

impl CoordinateMapper for IdentityMapper {
    fn price_to_y(&self, price: f64) -> Option<f32> {
        let y = price as f32;
        (self.pane.top()..=self.pane.bottom()).contains(&y).then_some(y)
    }

    fn y_to_price(&self, y: f32) -> Option<f64> {
        (self.pane.top()..=self.pane.bottom()).contains(&y).then_some(y as f64)
    }

    fn logical_to_x(&self, logical_index: f64) -> Option<f32> {
        let x = logical_index as f32;
        (self.pane.left()..=self.pane.right()).contains(&x).then_some(x)
    }

    fn x_to_logical(&self, x: f32) -> Option<f64> {
        (self.pane.left()..=self.pane.right()).contains(&x).then_some(x as f64)
    }

    fn pane(&self) -> Rect {
        self.pane
    }
}

fn engine() -> AnnotationEngine<IdentityMapper> {
    AnnotationEngine::default()
}

fn draw(engine: &mut AnnotationEngine<IdentityMapper>, mode: DrawingMode, clicks: &[Pos2]) {
    engine.set_drawing_mode(mode);
    for &click in clicks {
        engine.on_click(click);
    }
}

fn snapshot(engine: &AnnotationEngine<IdentityMapper>) -> Vec<Shape> {
    engine.shapes().to_vec()
}

#[test]
fn trend_line_keeps_the_clicked_points() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::TrendLine, &[pos2(10.0, 100.0), pos2(50.0, 140.0)]);

    assert_eq!(engine.shapes().len(), 1);
    assert_eq!(engine.drawing_mode(), DrawingMode::None);
    assert_eq!(engine.shapes()[0].id, "Linia Trendu 1");
    assert_eq!(
        engine.shapes()[0].geometry,
        Geometry::TrendLine(TrendLine {
            p1: Point::new(10.0, 100.0),
            p2: Point::new(50.0, 140.0),
        })
    );
}

#[test]
fn ids_count_per_kind() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 100.0)]);
    draw(&mut engine, DrawingMode::VerticalLine, &[pos2(20.0, 100.0)]);
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 200.0)]);

    let ids: Vec<&str> = engine.shapes().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["Pozioma 1", "Pionowa 1", "Pozioma 2"]);
}

#[test]
fn undo_and_redo_walk_back_and_forth_through_every_state() {
    let mut engine = engine();
    let mut states = vec![snapshot(&engine)];

    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 100.0)]);
    states.push(snapshot(&engine));
    draw(&mut engine, DrawingMode::TrendLine, &[pos2(10.0, 300.0), pos2(90.0, 350.0)]);
    states.push(snapshot(&engine));
    engine.delete_shape("Pozioma 1");
    states.push(snapshot(&engine));
    draw(&mut engine, DrawingMode::VerticalLine, &[pos2(500.0, 10.0)]);
    states.push(snapshot(&engine));
    engine.clear_all();
    states.push(snapshot(&engine));

    for expected in states.iter().rev().skip(1) {
        assert!(engine.undo());
        assert_eq!(&snapshot(&engine), expected);
    }
    assert!(!engine.undo());

    for expected in states.iter().skip(1) {
        assert!(engine.redo());
        assert_eq!(&snapshot(&engine), expected);
    }
    assert!(!engine.redo());
}

#[test]
fn a_new_edit_drops_the_redo_branch() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 100.0)]);
    engine.undo();
    assert!(engine.can_redo());

    draw(&mut engine, DrawingMode::VerticalLine, &[pos2(20.0, 100.0)]);
    assert!(!engine.can_redo());
}

#[test]
fn hit_test_respects_the_pixel_threshold() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 100.0)]);

    assert_eq!(engine.hit_test(pos2(400.0, 100.0)), Some("Pozioma 1"));
    assert_eq!(engine.hit_test(pos2(400.0, 104.0)), Some("Pozioma 1"));
    assert_eq!(engine.hit_test(pos2(400.0, 120.0)), None);
}

#[test]
fn hit_test_picks_the_nearest_shape() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 100.0)]);
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 106.0)]);

    assert_eq!(engine.hit_test(pos2(400.0, 104.0)), Some("Pozioma 2"));
}

#[test]
fn clicking_without_a_mode_selects_and_deselects() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::TrendLine, &[pos2(10.0, 100.0), pos2(50.0, 140.0)]);

    engine.on_click(pos2(30.0, 120.0));
    assert_eq!(engine.selected_id(), Some("Linia Trendu 1"));

    engine.on_click(pos2(600.0, 600.0));
    assert_eq!(engine.selected_id(), None);
}

#[test]
fn dragging_a_channel_endpoint_keeps_the_rail_anchor() {
    let mut engine = engine();
    draw(
        &mut engine,
        DrawingMode::Channel,
        &[pos2(10.0, 100.0), pos2(50.0, 140.0), pos2(30.0, 130.0)],
    );
    assert!(engine.select_shape("Kanał 1"));

    assert!(engine.on_pointer_down(pos2(10.0, 100.0)));
    engine.on_pointer_move(pos2(20.0, 90.0));
    assert!(engine.on_pointer_up());

    let Geometry::Channel(ch) = engine.shapes()[0].geometry else {
        panic!("expected a channel");
    };
    assert_eq!(ch.p1, Point::new(20.0, 90.0));
    assert_eq!(ch.p2, Point::new(50.0, 140.0));
    let anchor = ch.anchor();
    assert_eq!(anchor.ratio, 0.5);
    assert_eq!(anchor.offset, 10.0);
}

#[test]
fn one_drag_is_one_undo_step() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::TrendLine, &[pos2(10.0, 100.0), pos2(50.0, 140.0)]);
    let drawn = snapshot(&engine);
    engine.select_shape("Linia Trendu 1");

    assert!(engine.on_pointer_down(pos2(50.0, 140.0)));
    assert!(engine.is_dragging());
    for x in [55.0, 60.0, 70.0] {
        engine.on_pointer_move(pos2(x, 150.0));
    }
    engine.on_pointer_up();
    assert!(!engine.is_dragging());
    assert_ne!(snapshot(&engine), drawn);

    assert!(engine.undo());
    assert_eq!(snapshot(&engine), drawn);
    assert!(engine.undo());
    assert!(engine.shapes().is_empty());
    assert!(!engine.undo());
}

#[test]
fn a_drag_that_moves_nothing_records_nothing() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 100.0)]);
    engine.select_shape("Pozioma 1");

    let handle = pos2(500.0, 100.0);
    assert!(engine.on_pointer_down(handle));
    engine.on_pointer_move(handle);
    engine.on_pointer_up();

    assert!(engine.undo());
    assert!(engine.shapes().is_empty());
    assert!(!engine.undo());
}

#[test]
fn pointer_down_away_from_handles_does_not_drag() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::TrendLine, &[pos2(10.0, 100.0), pos2(50.0, 140.0)]);

    // Nothing selected yet
    assert!(!engine.on_pointer_down(pos2(10.0, 100.0)));

    engine.select_shape("Linia Trendu 1");
    assert!(!engine.on_pointer_down(pos2(30.0, 120.0)));
    assert!(!engine.on_pointer_up());
}

#[test]
fn clearing_an_empty_chart_is_not_an_undo_step() {
    let mut engine = engine();
    assert!(!engine.clear_all());
    assert!(!engine.can_undo());
}

#[test]
fn undo_drops_a_selection_whose_shape_is_gone() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::VerticalLine, &[pos2(40.0, 10.0)]);
    engine.select_shape("Pionowa 1");
    engine.on_pointer_move(pos2(40.0, 500.0));
    assert_eq!(engine.hovered_id(), Some("Pionowa 1"));

    assert!(engine.undo());
    assert_eq!(engine.selected_id(), None);
    assert_eq!(engine.hovered_id(), None);
}

#[test]
fn delete_selected_removes_only_that_shape() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 100.0)]);
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 200.0)]);
    engine.select_shape("Pozioma 1");

    assert!(engine.delete_selected());
    assert_eq!(engine.shapes().len(), 1);
    assert_eq!(engine.shapes()[0].id, "Pozioma 2");
    assert!(!engine.delete_selected());
}

#[test]
fn off_screen_shapes_are_skipped_but_kept() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 800.0)]);
    draw(&mut engine, DrawingMode::HorizontalLine, &[pos2(10.0, 100.0)]);
    assert_eq!(engine.render().shapes.len(), 2);

    engine.mapper_mut().pane = Rect::from_min_max(pos2(0.0, 0.0), pos2(500.0, 500.0));
    let frame = engine.render();
    assert_eq!(frame.shapes.len(), 1);
    assert_eq!(engine.shapes().len(), 2);
}

#[test]
fn selected_shape_gets_handle_markers() {
    let mut engine = engine();
    draw(
        &mut engine,
        DrawingMode::Channel,
        &[pos2(10.0, 100.0), pos2(50.0, 140.0), pos2(30.0, 130.0)],
    );
    assert!(engine.render().handles.is_empty());

    engine.select_shape("Kanał 1");
    let frame = engine.render();
    assert_eq!(frame.handles.len(), 3);
    // Baseline and parallel rail
    assert_eq!(frame.shapes.len(), 2);
}

#[test]
fn preview_follows_the_cursor_while_drawing() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::TrendLine, &[pos2(10.0, 100.0)]);
    assert!(engine.preview().is_none());

    engine.on_pointer_move(pos2(60.0, 160.0));
    assert_eq!(
        engine.preview(),
        Some(Geometry::TrendLine(TrendLine {
            p1: Point::new(10.0, 100.0),
            p2: Point::new(60.0, 160.0),
        }))
    );
    let frame = engine.render();
    assert_eq!(frame.preview.len(), 1);
    assert!(frame.preview[0].dashed);
}

#[test]
fn leaving_the_drawing_mode_discards_pending_clicks() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::Channel, &[pos2(10.0, 100.0), pos2(50.0, 140.0)]);
    assert_eq!(engine.pending_points().len(), 2);

    engine.set_drawing_mode(DrawingMode::None);
    assert!(engine.pending_points().is_empty());
    assert!(engine.shapes().is_empty());
    assert!(!engine.can_undo());
}

#[test]
fn clicks_outside_the_chart_are_ignored_while_drawing() {
    let mut engine = engine();
    draw(&mut engine, DrawingMode::TrendLine, &[pos2(10.0, 100.0), pos2(-5.0, 100.0)]);

    assert_eq!(engine.pending_points().len(), 1);
    assert_eq!(engine.drawing_mode(), DrawingMode::TrendLine);
}
