// Top Level Constants
pub const DEFAULT_TICKER: &str = "WIG20";

/// Index tickers offered as one-click shortcuts next to the ticker field.
pub const INDEX_TICKERS: &[&str] = &["WIG20", "WIG", "MWIG40", "SWIG80", "WIG-UKRAIN"];

pub mod annotation {
    /// Max pixel distance between a click and a shape for it to count as a hit.
    pub const HIT_THRESHOLD_PX: f32 = 5.0;
    /// Max pixel distance between a pointer-down and a handle to start a drag.
    pub const HANDLE_RADIUS_PX: f32 = 5.0;
    /// Radius of the handle markers drawn on the selected shape.
    pub const HANDLE_MARKER_RADIUS_PX: f32 = 5.0;
    pub const PREVIEW_DASH_LENGTH_PX: f32 = 6.0;
    pub const PREVIEW_GAP_LENGTH_PX: f32 = 4.0;
}

pub mod indicators {
    use crate::config::MovingAverageKind;

    pub const RSI_PERIOD: usize = 14;
    pub const RSI_OVERBOUGHT: f64 = 70.0;
    pub const RSI_OVERSOLD: f64 = 30.0;

    pub const MACD_FAST: usize = 12;
    pub const MACD_SLOW: usize = 26;
    pub const MACD_SIGNAL: usize = 9;

    pub const MOVING_AVERAGES: &[(MovingAverageKind, usize)] = &[
        (MovingAverageKind::Sma, 20),
        (MovingAverageKind::Ema, 50),
        (MovingAverageKind::Wma, 10),
    ];
}

pub mod demo {
    /// One trading year of daily bars.
    pub const BAR_COUNT: usize = 250;
    pub const START_PRICE: f64 = 2_300.0;
    /// 2024-01-02 00:00:00 UTC
    pub const START_TIME: i64 = 1_704_153_600;
    pub const BAR_SECONDS: i64 = 86_400;
}
