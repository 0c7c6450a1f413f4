use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLCV data point. `time` is unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Bar {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    // A doji counts as bullish
    pub fn get_type(&self) -> CandleType {
        if self.close >= self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    /// Direction used to colour volume bars. Only a strictly higher close
    /// counts as up, so a doji volume bar is bearish.
    pub fn volume_type(&self) -> CandleType {
        if self.close > self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    // Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish => (self.open, self.close),
            CandleType::Bearish => (self.close, self.open),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_range_is_ordered_for_both_directions() {
        let up = Bar::new(0, 10.0, 12.0, 9.0, 11.0, 100);
        let down = Bar::new(1, 11.0, 12.0, 9.0, 10.0, 100);

        assert_eq!(up.get_type(), CandleType::Bullish);
        assert_eq!(down.get_type(), CandleType::Bearish);
        assert_eq!(up.body_range(), (10.0, 11.0));
        assert_eq!(down.body_range(), (10.0, 11.0));
    }

    #[test]
    fn doji_candle_is_bullish_but_its_volume_is_bearish() {
        let doji = Bar::new(0, 10.0, 12.0, 9.0, 10.0, 100);
        assert_eq!(doji.get_type(), CandleType::Bullish);
        assert_eq!(doji.volume_type(), CandleType::Bearish);

        let up = Bar::new(1, 10.0, 12.0, 9.0, 10.5, 100);
        assert_eq!(up.volume_type(), CandleType::Bullish);
    }
}
