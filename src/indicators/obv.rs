//! On-Balance Volume.

use std::cmp::Ordering;

use crate::models::{BarSeries, IndicatorPoint, IndicatorSeries};

/// Running volume total: 0 on the first bar, then plus the bar's volume on a
/// higher close, minus it on a lower close, unchanged on a flat close.
pub fn obv(series: &BarSeries) -> IndicatorSeries {
    if series.is_empty() {
        return Vec::new();
    }

    let closes = &series.close_prices;
    let mut total: f64 = 0.0;

    let mut out = Vec::with_capacity(series.len());
    out.push(IndicatorPoint::new(series.timestamps[0], total));

    for i in 1..series.len() {
        let volume = series.volumes[i] as f64;
        match closes[i].partial_cmp(&closes[i - 1]) {
            Some(Ordering::Greater) => total += volume,
            Some(Ordering::Less) => total -= volume,
            _ => {}
        }
        out.push(IndicatorPoint::new(series.timestamps[i], total));
    }

    out
}
