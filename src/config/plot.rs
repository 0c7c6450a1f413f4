//! Plot visualization configuration

use eframe::egui::Color32;

use crate::config::{MovingAverageKind, ShapeKind};

pub struct PlotConfig {
    // --- CANDLESTICKS ---
    pub candle_bullish_color: Color32,
    pub candle_bearish_color: Color32,
    pub candle_width_pct: f64,  // 0.0 to 1.0 (relative to time step)
    pub candle_wick_width: f32, // Pixels

    // --- VOLUME ---
    /// Volume bars take the candle colour at this opacity.
    pub volume_opacity_pct: f32,
    pub volume_bar_width_pct: f64,

    pub plot_y_padding_pct: f64, // Y-Axis Padding factor (e.g. 0.05 = 5% padding top and bottom)

    // --- PANE HEIGHTS (pixels) ---
    pub volume_pane_height: f32,
    pub oscillator_pane_height: f32,

    // --- INDICATORS ---
    pub sma_color: Color32,
    pub ema_color: Color32,
    pub wma_color: Color32,
    pub indicator_line_width: f32,
    pub rsi_color: Color32,
    pub rsi_band_color: Color32,
    pub macd_line_color: Color32,
    pub macd_signal_color: Color32,
    pub macd_hist_up_color: Color32,
    pub macd_hist_down_color: Color32,
    pub obv_color: Color32,

    // --- ANNOTATIONS ---
    pub horizontal_line_color: Color32,
    pub vertical_line_color: Color32,
    pub trend_line_color: Color32,
    pub channel_color: Color32,
    pub annotation_line_width: f32,
    pub handle_fill_color: Color32,
    pub handle_outline_color: Color32,
    pub handle_outline_width: f32,
    pub preview_color: Color32,

    pub color_text_neutral: Color32,
    pub color_warning: Color32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    candle_bullish_color: Color32::from_rgb(0, 150, 136),
    candle_bearish_color: Color32::from_rgb(255, 82, 82),
    candle_width_pct: 0.8, // 80% width leaves a small gap between candles
    candle_wick_width: 1.0,

    volume_opacity_pct: 0.5,
    volume_bar_width_pct: 0.8,

    plot_y_padding_pct: 0.05,

    volume_pane_height: 90.0,
    oscillator_pane_height: 120.0,

    sma_color: Color32::from_rgb(41, 98, 255),
    ema_color: Color32::from_rgb(255, 152, 0),
    wma_color: Color32::from_rgb(156, 39, 176),
    indicator_line_width: 1.5,
    rsi_color: Color32::from_rgb(126, 87, 194),
    rsi_band_color: Color32::from_gray(120),
    macd_line_color: Color32::from_rgb(41, 98, 255),
    macd_signal_color: Color32::from_rgb(255, 109, 0),
    macd_hist_up_color: Color32::from_rgb(38, 166, 154),
    macd_hist_down_color: Color32::from_rgb(239, 83, 80),
    obv_color: Color32::from_rgb(0, 188, 212),

    horizontal_line_color: Color32::from_rgb(33, 150, 243),
    vertical_line_color: Color32::from_rgb(121, 85, 72),
    trend_line_color: Color32::from_rgb(255, 193, 7),
    channel_color: Color32::from_rgb(76, 175, 80),
    annotation_line_width: 2.0,
    handle_fill_color: Color32::WHITE,
    handle_outline_color: Color32::from_rgb(41, 98, 255),
    handle_outline_width: 1.5,
    preview_color: Color32::from_gray(160),

    color_text_neutral: Color32::LIGHT_GRAY,
    color_warning: Color32::from_rgb(255, 215, 0),
};

impl PlotConfig {
    pub fn moving_average_color(&self, kind: MovingAverageKind) -> Color32 {
        match kind {
            MovingAverageKind::Sma => self.sma_color,
            MovingAverageKind::Ema => self.ema_color,
            MovingAverageKind::Wma => self.wma_color,
        }
    }

    pub fn shape_color(&self, kind: ShapeKind) -> Color32 {
        match kind {
            ShapeKind::HorizontalLine => self.horizontal_line_color,
            ShapeKind::VerticalLine => self.vertical_line_color,
            ShapeKind::TrendLine => self.trend_line_color,
            ShapeKind::Channel => self.channel_color,
        }
    }
}
