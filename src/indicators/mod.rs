//! Technical indicators over a `BarSeries`.
//!
//! Every function here is pure and infallible: too little input simply
//! produces a shorter or empty series, and callers check lengths before
//! handing results to a renderer.

mod indicator_set;
mod macd;
mod moving_average;
mod obv;
mod rsi;

pub use indicator_set::{IndicatorParams, IndicatorSet, MovingAverageSeries, MovingAverageSpec};
pub use macd::{MacdOutput, MacdParams, macd};
pub use moving_average::{ema, sma, wma};
pub use obv::obv;
pub use rsi::rsi;
