//! Moving Average Convergence Divergence.

use serde::{Deserialize, Serialize};

use crate::config::constants::indicators::{MACD_FAST, MACD_SIGNAL, MACD_SLOW};
use crate::indicators::moving_average::{ema, ema_of};
use crate::models::{BarSeries, IndicatorSeries, join_by_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: MACD_FAST,
            slow: MACD_SLOW,
            signal: MACD_SIGNAL,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdOutput {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

impl MacdOutput {
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// `macd = EMA(fast) - EMA(slow)`, `signal = EMA(macd, signal)`,
/// `histogram = macd - signal`, every join done on time.
///
/// A series shorter than `slow` gives three empty series.
pub fn macd(series: &BarSeries, params: MacdParams) -> MacdOutput {
    if series.len() < params.slow {
        return MacdOutput::default();
    }

    let fast = ema(series, params.fast);
    let slow = ema(series, params.slow);

    let macd_line = join_by_time(&fast, &slow, |f, s| f - s);
    let signal_line = ema_of(&macd_line, params.signal);
    let histogram = join_by_time(&macd_line, &signal_line, |m, s| m - s);

    MacdOutput {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;

    fn ramp(n: usize) -> BarSeries {
        let bars: Vec<Bar> = (0..n)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.3;
                Bar::new(i as i64 * 86_400, c, c + 1.0, c - 1.0, c, 1_000)
            })
            .collect();
        BarSeries::from_bars("TEST", &bars)
    }

    #[test]
    fn too_short_gives_empty_output() {
        let out = macd(&ramp(25), MacdParams::default());
        assert!(out.is_empty());
        assert!(out.signal.is_empty());
        assert!(out.histogram.is_empty());
    }

    #[test]
    fn lines_start_where_their_emas_do() {
        let series = ramp(60);
        let out = macd(&series, MacdParams::default());

        // macd on bar slow-1, signal another signal-1 bars later
        assert_eq!(out.macd.len(), 60 - 26 + 1);
        assert_eq!(out.macd[0].time, series.timestamps[25]);
        assert_eq!(out.signal.len(), out.macd.len() - 9 + 1);
        assert_eq!(out.signal[0].time, series.timestamps[25 + 8]);
        assert_eq!(out.histogram.len(), out.signal.len());
    }

    #[test]
    fn histogram_is_exact_difference() {
        let out = macd(&ramp(80), MacdParams::default());
        let offset = out.macd.len() - out.signal.len();
        for (i, h) in out.histogram.iter().enumerate() {
            assert_eq!(h.time, out.signal[i].time);
            assert_eq!(h.value, out.macd[i + offset].value - out.signal[i].value);
        }
    }
}
