//! Relative Strength Index with Wilder smoothing.

use crate::models::{BarSeries, IndicatorPoint, IndicatorSeries};

/// RSI over closes. The first output sits on bar `period`, so the series is
/// `len - period` long (empty when there are not enough bars).
///
/// The first `period` changes are summed and turned into averages; after
/// that `avg = (avg * (period - 1) + current) / period`. A zero average loss
/// pins the value at exactly 100.
pub fn rsi(series: &BarSeries, period: usize) -> IndicatorSeries {
    let closes = &series.close_prices;
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        gain_sum += change.max(0.0);
        loss_sum += (-change).max(0.0);
    }

    let p = period as f64;
    let mut avg_gain = gain_sum / p;
    let mut avg_loss = loss_sum / p;

    let mut out = Vec::with_capacity(closes.len() - period);
    out.push(IndicatorPoint::new(
        series.timestamps[period],
        rsi_value(avg_gain, avg_loss),
    ));

    for i in (period + 1)..closes.len() {
        let change = closes[i] - closes[i - 1];
        avg_gain = (avg_gain * (p - 1.0) + change.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-change).max(0.0)) / p;
        out.push(IndicatorPoint::new(
            series.timestamps[i],
            rsi_value(avg_gain, avg_loss),
        ));
    }

    out
}

#[inline]
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}
