//! Simple, weighted and exponential moving averages over closes.
//!
//! All three are defined from bar `period - 1` onward. A `period` of zero or
//! a series shorter than `period` yields an empty output.

use crate::models::{BarSeries, IndicatorPoint, IndicatorSeries};

/// Arithmetic mean of the trailing `period` closes.
pub fn sma(series: &BarSeries, period: usize) -> IndicatorSeries {
    sma_over(&series.timestamps, &series.close_prices, period)
}

/// Linearly weighted mean, weights `1..=period` from oldest to newest.
pub fn wma(series: &BarSeries, period: usize) -> IndicatorSeries {
    wma_over(&series.timestamps, &series.close_prices, period)
}

/// EMA seeded with the SMA of the first `period` closes, then
/// `ema = close * k + prev * (1 - k)` with `k = 2 / (period + 1)`.
pub fn ema(series: &BarSeries, period: usize) -> IndicatorSeries {
    ema_over(&series.timestamps, &series.close_prices, period)
}

/// EMA over an already derived series (the MACD signal line).
pub(crate) fn ema_of(points: &[IndicatorPoint], period: usize) -> IndicatorSeries {
    let (times, values): (Vec<i64>, Vec<f64>) = points.iter().map(|p| (p.time, p.value)).unzip();
    ema_over(&times, &values, period)
}

#[inline]
fn seed_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sma_over(times: &[i64], values: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(IndicatorPoint::new(times[period - 1], seed_mean(&values[..period])));

    // Rolling sum, dropping the bar that leaves the window
    let mut rolling_sum: f64 = values[..period].iter().sum();
    for i in period..values.len() {
        rolling_sum += values[i] - values[i - period];
        out.push(IndicatorPoint::new(times[i], rolling_sum / period as f64));
    }

    out
}

fn wma_over(times: &[i64], values: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let divisor = (period * (period + 1)) as f64 / 2.0;

    values
        .windows(period)
        .enumerate()
        .map(|(start, window)| {
            let weighted: f64 = window
                .iter()
                .enumerate()
                .map(|(w, v)| (w + 1) as f64 * v)
                .sum();
            IndicatorPoint::new(times[start + period - 1], weighted / divisor)
        })
        .collect()
}

fn ema_over(times: &[i64], values: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = seed_mean(&values[..period]);

    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(IndicatorPoint::new(times[period - 1], ema));

    for i in period..values.len() {
        ema = values[i] * k + ema * (1.0 - k);
        out.push(IndicatorPoint::new(times[i], ema));
    }

    out
}
