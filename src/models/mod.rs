mod bar_series;
mod indicator_series;

pub use bar_series::BarSeries;
pub use indicator_series::{IndicatorPoint, IndicatorSeries};

pub(crate) use indicator_series::join_by_time;
