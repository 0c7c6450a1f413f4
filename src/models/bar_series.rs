use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Columnar OHLCV storage for one ticker. Ordering by `timestamps` is
/// load-bearing for every recurrence-based indicator.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    pub ticker: String,
    pub timestamps: Vec<i64>,
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,
    pub volumes: Vec<u64>,
}

impl BarSeries {
    pub fn from_bars(ticker: impl Into<String>, bars: &[Bar]) -> Self {
        let len = bars.len();

        let mut ts_vec = Vec::with_capacity(len);
        let mut open_vec = Vec::with_capacity(len);
        let mut high_vec = Vec::with_capacity(len);
        let mut low_vec = Vec::with_capacity(len);
        let mut close_vec = Vec::with_capacity(len);
        let mut vol_vec = Vec::with_capacity(len);

        for b in bars {
            ts_vec.push(b.time);
            open_vec.push(b.open);
            high_vec.push(b.high);
            low_vec.push(b.low);
            close_vec.push(b.close);
            vol_vec.push(b.volume);
        }

        Self {
            ticker: ticker.into(),
            timestamps: ts_vec,
            open_prices: open_vec,
            high_prices: high_vec,
            low_prices: low_vec,
            close_prices: close_vec,
            volumes: vol_vec,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn get_bar(&self, idx: usize) -> Bar {
        Bar::new(
            self.timestamps[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }

    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        (0..self.len()).map(|i| self.get_bar(i))
    }

    /// Bar index holding `time`, if any.
    pub fn index_of(&self, time: i64) -> Option<usize> {
        self.timestamps.binary_search(&time).ok()
    }

    /// (lowest low, highest high) over `start..end`, clamped to the series.
    pub fn price_range(&self, start: usize, end: usize) -> Option<(f64, f64)> {
        let end = end.min(self.len());
        if start >= end {
            return None;
        }

        let low = self.low_prices[start..end]
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let high = self.high_prices[start..end]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        Some((low, high))
    }

    pub fn last_close(&self) -> Option<f64> {
        self.close_prices.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BarSeries {
        let bars = vec![
            Bar::new(100, 10.0, 12.0, 9.0, 11.0, 5),
            Bar::new(200, 11.0, 15.0, 10.0, 14.0, 7),
            Bar::new(300, 14.0, 14.5, 8.0, 9.0, 3),
        ];
        BarSeries::from_bars("TEST", &bars)
    }

    #[test]
    fn from_bars_keeps_columns_in_step() {
        let series = sample();
        assert_eq!(series.len(), 3);
        assert_eq!(series.get_bar(1), Bar::new(200, 11.0, 15.0, 10.0, 14.0, 7));
        assert_eq!(series.bars().count(), 3);
        assert_eq!(series.last_close(), Some(9.0));
    }

    #[test]
    fn index_of_finds_exact_times_only() {
        let series = sample();
        assert_eq!(series.index_of(200), Some(1));
        assert_eq!(series.index_of(250), None);
    }

    #[test]
    fn price_range_clamps_and_rejects_empty_windows() {
        let series = sample();
        assert_eq!(series.price_range(0, 10), Some((8.0, 15.0)));
        assert_eq!(series.price_range(1, 2), Some((10.0, 15.0)));
        assert_eq!(series.price_range(2, 2), None);
        assert_eq!(BarSeries::default().price_range(0, 1), None);
    }
}
