use itertools::{EitherOrBoth, Itertools};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub time: i64,
    pub value: f64,
}

impl IndicatorPoint {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// One entry per bar from the point where the indicator becomes defined.
pub type IndicatorSeries = Vec<IndicatorPoint>;

/// Joins two time-ordered series on `time`, keeping only times present in
/// both, and combines the values with `f`.
pub(crate) fn join_by_time(
    a: &[IndicatorPoint],
    b: &[IndicatorPoint],
    f: impl Fn(f64, f64) -> f64,
) -> IndicatorSeries {
    a.iter()
        .merge_join_by(b.iter(), |x, y| x.time.cmp(&y.time))
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(x, y) => Some(IndicatorPoint::new(x.time, f(x.value, y.value))),
            _ => None,
        })
        .collect()
}
