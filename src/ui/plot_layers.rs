use eframe::egui::{Color32, Stroke};
use egui_plot::{Bar as PlotBar, BarChart, HLine, Line, LineStyle, PlotPoints, PlotUi, Polygon};

use crate::config::constants::indicators::{RSI_OVERBOUGHT, RSI_OVERSOLD};
use crate::config::plot::PLOT_CONFIG;
use crate::domain::Bar;
use crate::indicators::IndicatorSet;
use crate::models::{BarSeries, IndicatorPoint};
use crate::ui::styles::{DirectionColor, apply_opacity};
use crate::ui::ui_plot_view::PlotVisibility;
use crate::ui::ui_text::UI_TEXT;

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub series: &'a BarSeries,
    pub indicators: &'a IndicatorSet,
    pub visibility: &'a PlotVisibility,
}

impl LayerContext<'_> {
    /// Indicator points placed on the bar-index x axis. Points whose time is
    /// not a bar of the series are skipped.
    pub fn plot_points(&self, points: &[IndicatorPoint]) -> PlotPoints<'static> {
        let pts: Vec<[f64; 2]> = points
            .iter()
            .filter_map(|p| Some([self.series.index_of(p.time)? as f64, p.value]))
            .collect();
        PlotPoints::new(pts)
    }
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// PRICE PANE
// ============================================================================
pub struct CandlestickLayer;

impl PlotLayer for CandlestickLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for (i, bar) in ctx.series.bars().enumerate() {
            draw_candle(plot_ui, i as f64, &bar);
        }
    }
}

fn draw_candle(ui: &mut PlotUi, x: f64, bar: &Bar) {
    let color = bar.get_type().color();

    ui.line(
        Line::new("", PlotPoints::new(vec![[x, bar.low], [x, bar.high]]))
            .color(color)
            .width(PLOT_CONFIG.candle_wick_width),
    );

    let (body_bot, body_top_raw) = bar.body_range();
    // Doji: give the body a sliver of height so it stays visible
    let body_top = if (body_top_raw - body_bot).abs() < f64::EPSILON {
        body_bot * 1.0001
    } else {
        body_top_raw
    };

    let half_w = PLOT_CONFIG.candle_width_pct / 2.0;
    let pts = vec![
        [x - half_w, body_bot],
        [x + half_w, body_bot],
        [x + half_w, body_top],
        [x - half_w, body_top],
    ];

    // No stroke: outlines blur thin candles
    ui.polygon(
        Polygon::new("", PlotPoints::new(pts))
            .fill_color(color)
            .stroke(Stroke::NONE),
    );
}

pub struct MovingAverageLayer;

impl PlotLayer for MovingAverageLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for ma in &ctx.indicators.moving_averages {
            if ma.points.is_empty() {
                continue;
            }
            plot_ui.line(
                Line::new(ma.spec.to_string(), ctx.plot_points(&ma.points))
                    .color(PLOT_CONFIG.moving_average_color(ma.spec.kind))
                    .width(PLOT_CONFIG.indicator_line_width),
            );
        }
    }
}

// ============================================================================
// VOLUME PANE
// ============================================================================
pub struct VolumeLayer;

impl PlotLayer for VolumeLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let bars: Vec<PlotBar> = ctx
            .series
            .bars()
            .enumerate()
            .map(|(i, bar)| {
                let color = apply_opacity(bar.volume_type().color(), PLOT_CONFIG.volume_opacity_pct);
                PlotBar::new(i as f64, bar.volume as f64)
                    .width(PLOT_CONFIG.volume_bar_width_pct)
                    .fill(color)
                    .stroke(Stroke::NONE)
            })
            .collect();

        plot_ui.bar_chart(BarChart::new(UI_TEXT.plot_volume.as_str(), bars));
    }
}

// ============================================================================
// OSCILLATOR PANES
// ============================================================================
pub struct RsiLayer;

impl PlotLayer for RsiLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let band = LineStyle::Dashed { length: 6.0 };
        for level in [RSI_OVERSOLD, RSI_OVERBOUGHT] {
            plot_ui.hline(
                HLine::new("", level)
                    .color(PLOT_CONFIG.rsi_band_color)
                    .style(band)
                    .width(1.0),
            );
        }

        plot_ui.line(
            Line::new(UI_TEXT.tb_rsi.as_str(), ctx.plot_points(&ctx.indicators.rsi))
                .color(PLOT_CONFIG.rsi_color)
                .width(PLOT_CONFIG.indicator_line_width),
        );
    }
}

pub struct MacdLayer;

impl PlotLayer for MacdLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let macd = &ctx.indicators.macd;

        let histogram: Vec<PlotBar> = macd
            .histogram
            .iter()
            .filter_map(|p| {
                let x = ctx.series.index_of(p.time)? as f64;
                let color = histogram_color(p.value);
                Some(
                    PlotBar::new(x, p.value)
                        .width(PLOT_CONFIG.volume_bar_width_pct)
                        .fill(color)
                        .stroke(Stroke::NONE),
                )
            })
            .collect();
        plot_ui.bar_chart(BarChart::new(UI_TEXT.plot_macd_histogram.as_str(), histogram));

        plot_ui.line(
            Line::new(UI_TEXT.tb_macd.as_str(), ctx.plot_points(&macd.macd))
                .color(PLOT_CONFIG.macd_line_color)
                .width(PLOT_CONFIG.indicator_line_width),
        );
        plot_ui.line(
            Line::new(UI_TEXT.plot_macd_signal.as_str(), ctx.plot_points(&macd.signal))
                .color(PLOT_CONFIG.macd_signal_color)
                .width(PLOT_CONFIG.indicator_line_width),
        );
    }
}

fn histogram_color(value: f64) -> Color32 {
    if value >= 0.0 {
        PLOT_CONFIG.macd_hist_up_color
    } else {
        PLOT_CONFIG.macd_hist_down_color
    }
}

pub struct ObvLayer;

impl PlotLayer for ObvLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        plot_ui.line(
            Line::new(UI_TEXT.tb_obv.as_str(), ctx.plot_points(&ctx.indicators.obv))
                .color(PLOT_CONFIG.obv_color)
                .width(PLOT_CONFIG.indicator_line_width),
        );
    }
}
