use std::ops::RangeInclusive;

use eframe::egui::{CursorIcon, Id, Ui};
use egui_plot::{GridMark, HPlacement, Plot, PlotBounds, PlotPoint, PlotUi};
use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationEngine;
use crate::config::DrawingMode;
use crate::config::plot::PLOT_CONFIG;
use crate::indicators::IndicatorSet;
use crate::models::BarSeries;
use crate::ui::annotation_painter::paint_annotations;
use crate::ui::plot_layers::{
    CandlestickLayer, LayerContext, MacdLayer, MovingAverageLayer, ObvLayer, PlotLayer, RsiLayer,
    VolumeLayer,
};
use crate::ui::plot_mapper::PlotMapper;
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::format_price;
use crate::utils::epoch_sec_to_date_string;

/// Which overlays and panes are shown. Persisted with the app preferences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct PlotVisibility {
    pub moving_averages: bool,
    pub volume: bool,
    pub rsi: bool,
    pub macd: bool,
    pub obv: bool,
}

impl Default for PlotVisibility {
    fn default() -> Self {
        Self {
            moving_averages: true,
            volume: true,
            rsi: true,
            macd: true,
            obv: false,
        }
    }
}

impl PlotVisibility {
    fn lower_panes_height(&self) -> f32 {
        let mut height = 0.0;
        if self.volume {
            height += PLOT_CONFIG.volume_pane_height;
        }
        for shown in [self.rsi, self.macd, self.obv] {
            if shown {
                height += PLOT_CONFIG.oscillator_pane_height;
            }
        }
        height
    }
}

const X_LINK_GROUP: &str = "chart_x_axis";
const MIN_PRICE_PANE_HEIGHT: f32 = 150.0;

/// The price chart plus the volume and oscillator panes, x-linked so they
/// pan and zoom together.
#[derive(Default)]
pub struct ChartView {
    fit_on_next_frame: bool,
}

impl ChartView {
    /// Fit the x axis to the whole series on the next frame (new data).
    pub fn request_fit(&mut self) {
        self.fit_on_next_frame = true;
    }

    pub(crate) fn show(
        &mut self,
        ui: &mut Ui,
        series: &BarSeries,
        indicators: &IndicatorSet,
        visibility: &PlotVisibility,
        annotations: &mut AnnotationEngine<PlotMapper>,
    ) {
        let ctx = LayerContext {
            series,
            indicators,
            visibility,
        };
        let fit_x = std::mem::take(&mut self.fit_on_next_frame).then(|| full_x_range(series));

        ui.heading(format!("{} {}", UI_TEXT.plot_title_prefix, series.ticker));

        let spacing = ui.spacing().item_spacing.y * 5.0;
        let price_height = (ui.available_height() - visibility.lower_panes_height() - spacing)
            .max(MIN_PRICE_PANE_HEIGHT);

        self.show_price_pane(ui, &ctx, price_height, fit_x.clone(), annotations);

        if visibility.volume {
            linked_plot("volume_plot", PLOT_CONFIG.volume_pane_height, series)
                .show_x(false)
                .show(ui, |plot_ui| {
                    apply_x_fit(plot_ui, &fit_x);
                    let range = visible_indices(&plot_ui.plot_bounds(), series.len());
                    let max_volume = series.volumes[range]
                        .iter()
                        .copied()
                        .max()
                        .unwrap_or(0) as f64;
                    plot_ui.set_plot_bounds_y(0.0..=(max_volume * 1.1).max(1.0));
                    VolumeLayer.render(plot_ui, &ctx);
                });
        }

        if visibility.rsi {
            linked_plot("rsi_plot", PLOT_CONFIG.oscillator_pane_height, series).show(ui, |plot_ui| {
                apply_x_fit(plot_ui, &fit_x);
                plot_ui.set_plot_bounds_y(0.0..=100.0);
                RsiLayer.render(plot_ui, &ctx);
            });
        }

        if visibility.macd {
            linked_plot("macd_plot", PLOT_CONFIG.oscillator_pane_height, series).show(ui, |plot_ui| {
                apply_x_fit(plot_ui, &fit_x);
                let macd = &indicators.macd;
                let values = macd
                    .macd
                    .iter()
                    .chain(&macd.signal)
                    .chain(&macd.histogram);
                fit_y_to_visible(plot_ui, series, values.map(|p| (p.time, p.value)));
                MacdLayer.render(plot_ui, &ctx);
            });
        }

        if visibility.obv {
            linked_plot("obv_plot", PLOT_CONFIG.oscillator_pane_height, series).show(ui, |plot_ui| {
                apply_x_fit(plot_ui, &fit_x);
                fit_y_to_visible(plot_ui, series, indicators.obv.iter().map(|p| (p.time, p.value)));
                ObvLayer.render(plot_ui, &ctx);
            });
        }
    }

    fn show_price_pane(
        &mut self,
        ui: &mut Ui,
        ctx: &LayerContext,
        height: f32,
        fit_x: Option<RangeInclusive<f64>>,
        annotations: &mut AnnotationEngine<PlotMapper>,
    ) {
        let series = ctx.series;

        // A press on a handle has to be seen before the plot decides to pan,
        // so it is tested against the previous frame's transform.
        let (pressed, released, latest_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
            )
        });
        if pressed {
            if let Some(pos) = latest_pos.filter(|p| annotations.mapper().contains(*p)) {
                annotations.on_pointer_down(pos);
            }
        }
        let axes = pan_zoom_axes(annotations.is_dragging());

        let timestamps = &series.timestamps;
        let plot = linked_plot("price_plot", height, series)
            .allow_drag(axes)
            .allow_zoom(axes)
            .allow_scroll(axes)
            .y_axis_label(UI_TEXT.plot_y_axis.as_str())
            .label_formatter(move |_name, value: &PlotPoint| {
                format!("{}\n{}", index_to_date(timestamps, value.x), format_price(value.y))
            });

        let response = plot.show(ui, |plot_ui| {
            apply_x_fit(plot_ui, &fit_x);

            let range = visible_indices(&plot_ui.plot_bounds(), series.len());
            if let Some((low, high)) = series.price_range(range.start, range.end) {
                let pad = (high - low).max(f64::EPSILON) * PLOT_CONFIG.plot_y_padding_pct;
                plot_ui.set_plot_bounds_y((low - pad)..=(high + pad));
            }

            CandlestickLayer.render(plot_ui, ctx);
            if ctx.visibility.moving_averages {
                MovingAverageLayer.render(plot_ui, ctx);
            }
        });

        annotations.mapper_mut().set_transform(response.transform);
        let plot_response = response.response;

        if annotations.is_dragging() {
            if let Some(pos) = latest_pos {
                annotations.on_pointer_move(pos);
            }
        } else if let Some(pos) = plot_response.hover_pos() {
            annotations.on_pointer_move(pos);
        } else {
            annotations.on_pointer_leave();
        }

        if plot_response.clicked() {
            if let Some(pos) = plot_response.interact_pointer_pos() {
                annotations.on_click(pos);
            }
        }

        if released {
            annotations.on_pointer_up();
        }

        if annotations.is_dragging() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if plot_response.hovered() {
            if annotations.drawing_mode() != DrawingMode::None {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            } else if annotations.hovered_id().is_some() {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            }
        }

        let frame = annotations.render();
        if !frame.is_empty() {
            paint_annotations(&ui.painter_at(frame.clip_rect), &frame);
        }

        if let Some(id) = annotations.hovered_id().map(str::to_owned) {
            plot_response.on_hover_text_at_pointer(id);
        }
    }
}

/// Common setup for every pane: bar-index x axis linked across panes, price
/// axis on the right, y fitted by the pane itself.
fn linked_plot<'a>(id: &str, height: f32, series: &'a BarSeries) -> Plot<'a> {
    let timestamps = &series.timestamps;
    Plot::new(id)
        .height(height)
        .link_axis(Id::new(X_LINK_GROUP), [true, false])
        .link_cursor(Id::new(X_LINK_GROUP), [true, false])
        .allow_drag([true, false])
        .allow_zoom([true, false])
        .allow_scroll([true, false])
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .y_axis_position(HPlacement::Right)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            index_to_date(timestamps, mark.value)
        })
}

/// Pan/zoom/scroll axes of the price plot. Everything is off while a handle
/// drag is live so the x axis cannot move under the edit.
fn pan_zoom_axes(dragging: bool) -> [bool; 2] {
    [!dragging, false]
}

fn index_to_date(timestamps: &[i64], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || idx as usize >= timestamps.len() {
        return String::new();
    }
    epoch_sec_to_date_string(timestamps[idx as usize])
}

fn full_x_range(series: &BarSeries) -> RangeInclusive<f64> {
    -1.0..=series.len() as f64
}

fn apply_x_fit(plot_ui: &mut PlotUi, fit_x: &Option<RangeInclusive<f64>>) {
    if let Some(range) = fit_x {
        plot_ui.set_plot_bounds_x(range.clone());
    }
}

/// Bar indices inside the visible x range, clamped to the series. Falls back
/// to the whole series while the bounds are not yet valid.
fn visible_indices(bounds: &PlotBounds, len: usize) -> std::ops::Range<usize> {
    let x = bounds.range_x();
    let (min, max) = (*x.start(), *x.end());
    if !min.is_finite() || !max.is_finite() || max <= min {
        return 0..len;
    }
    let start = (min.floor().max(0.0) as usize).min(len);
    let end = ((max.ceil() + 1.0).max(0.0) as usize).min(len);
    if start >= end { 0..len } else { start..end }
}

fn fit_y_to_visible(
    plot_ui: &mut PlotUi,
    series: &BarSeries,
    values: impl Iterator<Item = (i64, f64)>,
) {
    let range = visible_indices(&plot_ui.plot_bounds(), series.len());
    let (Some(&first), Some(&last)) = (
        series.timestamps.get(range.start),
        series.timestamps.get(range.end.saturating_sub(1)),
    ) else {
        return;
    };

    let (low, high) = values
        .filter(|(t, _)| (first..=last).contains(t))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| {
            (lo.min(v), hi.max(v))
        });
    if !low.is_finite() || !high.is_finite() {
        return;
    }
    let pad = (high - low).max(1.0) * PLOT_CONFIG.plot_y_padding_pct;
    plot_ui.set_plot_bounds_y((low - pad)..=(high + pad));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_indices_clamp_to_the_series() {
        let bounds = PlotBounds::from_min_max([-5.0, 0.0], [3.2, 1.0]);
        assert_eq!(visible_indices(&bounds, 10), 0..5);

        let past_end = PlotBounds::from_min_max([8.0, 0.0], [40.0, 1.0]);
        assert_eq!(visible_indices(&past_end, 10), 8..10);
    }

    #[test]
    fn handle_drag_freezes_pan_and_zoom() {
        assert_eq!(pan_zoom_axes(true), [false, false]);
        assert_eq!(pan_zoom_axes(false), [true, false]);
    }

    #[test]
    fn axis_dates_outside_the_series_are_blank() {
        let ts = vec![1_704_153_600, 1_704_240_000];
        assert_eq!(index_to_date(&ts, 1.2), "2024-01-03");
        assert_eq!(index_to_date(&ts, -1.0), "");
        assert_eq!(index_to_date(&ts, 5.0), "");
    }
}
