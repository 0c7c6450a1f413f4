use serde::{Deserialize, Serialize};

use crate::config::{DF, MovingAverageKind, constants::indicators::{MOVING_AVERAGES, RSI_PERIOD}};
use crate::indicators::{MacdOutput, MacdParams, ema, macd, obv, rsi, sma, wma};
use crate::models::{BarSeries, IndicatorSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingAverageSpec {
    pub kind: MovingAverageKind,
    pub period: usize,
}

impl MovingAverageSpec {
    pub fn new(kind: MovingAverageKind, period: usize) -> Self {
        Self { kind, period }
    }

    pub fn compute(&self, series: &BarSeries) -> IndicatorSeries {
        match self.kind {
            MovingAverageKind::Sma => sma(series, self.period),
            MovingAverageKind::Ema => ema(series, self.period),
            MovingAverageKind::Wma => wma(series, self.period),
        }
    }
}

impl std::fmt::Display for MovingAverageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.period)
    }
}

/// User-tunable indicator parameters. Persisted with the app preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub moving_averages: Vec<MovingAverageSpec>,
    pub rsi_period: usize,
    pub macd: MacdParams,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            moving_averages: MOVING_AVERAGES
                .iter()
                .map(|&(kind, period)| MovingAverageSpec::new(kind, period))
                .collect(),
            rsi_period: RSI_PERIOD,
            macd: MacdParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverageSeries {
    pub spec: MovingAverageSpec,
    pub points: IndicatorSeries,
}

/// Every derived series for one `BarSeries`, recomputed in full whenever
/// the bars or the parameters change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    pub moving_averages: Vec<MovingAverageSeries>,
    pub rsi: IndicatorSeries,
    pub macd: MacdOutput,
    pub obv: IndicatorSeries,
}

impl IndicatorSet {
    pub fn compute(series: &BarSeries, params: &IndicatorParams) -> Self {
        crate::trace_time!("Indicator recompute", 2_000, {
            let moving_averages: Vec<MovingAverageSeries> = params
                .moving_averages
                .iter()
                .map(|spec| MovingAverageSeries {
                    spec: *spec,
                    points: spec.compute(series),
                })
                .collect();

            let set = Self {
                moving_averages,
                rsi: rsi(series, params.rsi_period),
                macd: macd(series, params.macd),
                obv: obv(series),
            };

            if DF.log_indicators {
                set.log_empty(series);
            }
            set
        })
    }

    fn log_empty(&self, series: &BarSeries) {
        for ma in &self.moving_averages {
            if ma.points.is_empty() {
                log::debug!("{} empty for {} ({} bars)", ma.spec, series.ticker, series.len());
            }
        }
        if self.rsi.is_empty() {
            log::debug!("RSI empty for {} ({} bars)", series.ticker, series.len());
        }
        if self.macd.is_empty() {
            log::debug!("MACD empty for {} ({} bars)", series.ticker, series.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;

    fn series(n: usize) -> BarSeries {
        let bars: Vec<Bar> = (0..n)
            .map(|i| {
                let c = 50.0 + (i % 7) as f64;
                Bar::new(i as i64, c, c + 1.0, c - 1.0, c, 100 + i as u64)
            })
            .collect();
        BarSeries::from_bars("TEST", &bars)
    }

    #[test]
    fn default_params_produce_one_series_per_overlay() {
        let params = IndicatorParams::default();
        let set = IndicatorSet::compute(&series(120), &params);

        assert_eq!(set.moving_averages.len(), params.moving_averages.len());
        for ma in &set.moving_averages {
            assert_eq!(ma.points.len(), 120 - ma.spec.period + 1);
        }
        assert_eq!(set.rsi.len(), 120 - params.rsi_period);
        assert_eq!(set.obv.len(), 120);
        assert!(!set.macd.is_empty());
    }

    #[test]
    fn short_series_degrades_to_empty_parts() {
        let set = IndicatorSet::compute(&series(5), &IndicatorParams::default());
        assert!(set.moving_averages.iter().all(|ma| ma.points.is_empty()));
        assert!(set.rsi.is_empty());
        assert!(set.macd.is_empty());
        assert_eq!(set.obv.len(), 5);
    }

    #[test]
    fn moving_average_label_reads_like_a_legend() {
        let spec = MovingAverageSpec::new(MovingAverageKind::Ema, 50);
        assert_eq!(spec.to_string(), "EMA(50)");
    }
}
