use std::{
    borrow::Cow,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Deserialize;

use crate::config::constants::demo::{BAR_COUNT, BAR_SECONDS, START_PRICE, START_TIME};
use crate::config::{DF, PERSISTENCE};
use crate::domain::Bar;
use crate::models::BarSeries;
use crate::utils::parse_date_to_epoch_sec;

/// Where a ticker's bars come from.
pub trait BarSource: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self, ticker: &str) -> Result<BarSeries>;
}

/// Reads `<dir>/<TICKER>.json` files in the layout served by `/api/data/{ticker}`.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, ticker: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", ticker.to_uppercase(), PERSISTENCE.bars.extension))
    }
}

impl Default for JsonDirSource {
    fn default() -> Self {
        Self::new(PERSISTENCE.bars.directory)
    }
}

impl BarSource for JsonDirSource {
    fn name(&self) -> &str {
        "json"
    }

    fn load(&self, ticker: &str) -> Result<BarSeries> {
        let path = self.path_for(ticker);
        let bars = load_bars_file(&path)?;
        if bars.is_empty() {
            bail!("Brak danych dla symbolu: {}", ticker);
        }
        Ok(BarSeries::from_bars(ticker, &bars))
    }
}

/// Deterministic synthetic daily series. Same ticker, same bars, every run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

impl BarSource for DemoSource {
    fn name(&self) -> &str {
        "demo"
    }

    fn load(&self, ticker: &str) -> Result<BarSeries> {
        Ok(BarSeries::from_bars(ticker, &demo_bars(ticker, BAR_COUNT)))
    }
}

pub fn load_bars_file(path: &Path) -> Result<Vec<Bar>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bar file {}", path.display()))?;
    parse_bars_json(&text).with_context(|| format!("Failed to parse bar file {}", path.display()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTime {
    Epoch(i64),
    Text(String),
}

#[derive(Deserialize)]
struct RawBar {
    time: RawTime,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
}

impl RawBar {
    fn into_bar(self) -> Option<Bar> {
        let time = match self.time {
            RawTime::Epoch(t) => t,
            RawTime::Text(s) => parse_date_to_epoch_sec(&s)?,
        };
        let price = |p: Option<f64>| p.filter(|v| v.is_finite());
        let volume = self
            .volume
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map_or(0, |v| v.round() as u64);

        Some(Bar::new(
            time,
            price(self.open)?,
            price(self.high)?,
            price(self.low)?,
            price(self.close)?,
            volume,
        ))
    }
}

/// Pandas exports write missing values as bare `NaN`/`Infinity` tokens,
/// which are not JSON. Rewrites them to `null` outside string literals.
fn null_non_finite_tokens(text: &str) -> Cow<'_, str> {
    if !text.contains("NaN") && !text.contains("Infinity") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = ["-Infinity", "Infinity", "NaN"]
            .into_iter()
            .find(|t| rest.starts_with(*t))
        {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Cow::Owned(out)
}

/// Parses a JSON array of bar records.
///
/// Records with an unparseable time or a missing price are dropped, a
/// missing volume becomes 0. The result is sorted by time with duplicate
/// times removed (first record wins).
pub fn parse_bars_json(text: &str) -> Result<Vec<Bar>> {
    let raw: Vec<RawBar> = serde_json::from_str(&null_non_finite_tokens(text))
        .context("Expected a JSON array of bars")?;
    let total = raw.len();

    let mut bars: Vec<Bar> = raw.into_iter().filter_map(RawBar::into_bar).collect();
    bars.sort_by_key(|b| b.time);
    bars.dedup_by_key(|b| b.time);

    if DF.log_loader && bars.len() != total {
        log::warn!("Dropped {} of {} bar records", total - bars.len(), total);
    }

    Ok(bars)
}

/// Mean-reverting random walk seeded from the ticker name.
pub fn demo_bars(ticker: &str, count: usize) -> Vec<Bar> {
    let mut hasher = DefaultHasher::new();
    ticker.hash(&mut hasher);
    let mut rng = StdRng::seed_from_u64(hasher.finish());

    let mut close = START_PRICE;
    (0..count)
        .map(|i| {
            let open = close;
            let drift = (START_PRICE - open) * 0.01;
            close = (open + drift + (rng.random::<f64>() - 0.5) * open * 0.03).max(1.0);
            let high = open.max(close) * (1.0 + rng.random::<f64>() * 0.01);
            let low = open.min(close) * (1.0 - rng.random::<f64>() * 0.01);
            let volume = 200_000 + (rng.random::<f64>() * 800_000.0) as u64;
            Bar::new(START_TIME + i as i64 * BAR_SECONDS, open, high, low, close, volume)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_epoch_and_date_times() {
        let json = r#"[
            {"time": "2024-01-03", "open": 2.0, "high": 3.0, "low": 1.0, "close": 2.5, "volume": 10},
            {"time": 1704153600, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 5.0}
        ]"#;
        let bars = parse_bars_json(json).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].time, 1_704_153_600);
        assert_eq!(bars[1].time, 1_704_240_000);
    }

    #[test]
    fn drops_incomplete_records_and_defaults_volume() {
        let json = r#"[
            {"time": 1, "open": null, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 5},
            {"time": 2, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5},
            {"time": 3, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": null},
            {"time": "not a date", "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5}
        ]"#;
        let bars = parse_bars_json(json).unwrap();
        let times: Vec<i64> = bars.iter().map(|b| b.time).collect();
        assert_eq!(times, vec![2, 3]);
        assert!(bars.iter().all(|b| b.volume == 0));
    }

    #[test]
    fn nan_volume_of_an_index_row_becomes_zero() {
        let json = r#"[
            {"time": 1704153600, "open": 2300.5, "high": 2310.0, "low": 2290.0, "close": 2305.0, "volume": NaN},
            {"time": 1704240000, "open": 2305.0, "high": 2320.0, "low": 2300.0, "close": 2315.0, "volume": 1000.0}
        ]"#;
        let bars = parse_bars_json(json).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].volume, 0);
        assert_eq!(bars[1].volume, 1_000);
    }

    #[test]
    fn non_finite_prices_drop_the_row_and_strings_are_untouched() {
        let json = r#"[
            {"time": 1, "open": NaN, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 5},
            {"time": 2, "open": 1.0, "high": Infinity, "low": -Infinity, "close": 1.5, "volume": 5},
            {"time": "NaN", "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 5},
            {"time": 3, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "volume": 5}
        ]"#;
        let bars = parse_bars_json(json).unwrap();
        assert_eq!(bars.iter().map(|b| b.time).collect::<Vec<_>>(), vec![3]);
        assert_eq!(
            null_non_finite_tokens(r#"{"name": "NaN \"Infinity\"", "v": -Infinity}"#),
            r#"{"name": "NaN \"Infinity\"", "v": null}"#
        );
    }

    #[test]
    fn sorts_and_dedups_by_time() {
        let json = r#"[
            {"time": 5, "open": 1, "high": 1, "low": 1, "close": 1, "volume": 1},
            {"time": 2, "open": 2, "high": 2, "low": 2, "close": 2, "volume": 2},
            {"time": 5, "open": 3, "high": 3, "low": 3, "close": 3, "volume": 3}
        ]"#;
        let bars = parse_bars_json(json).unwrap();
        assert_eq!(bars.iter().map(|b| b.time).collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn rejects_non_array_payloads() {
        assert!(parse_bars_json(r#"{"error": "Brak symbolu spółki"}"#).is_err());
    }

    #[test]
    fn demo_series_is_deterministic_and_ordered() {
        let a = demo_bars("WIG20", 50);
        let b = demo_bars("WIG20", 50);
        assert_eq!(a, b);
        assert_ne!(a, demo_bars("MWIG40", 50));
        assert!(a.windows(2).all(|w| w[0].time < w[1].time));
        assert!(a.iter().all(|bar| bar.low <= bar.open.min(bar.close)));
        assert!(a.iter().all(|bar| bar.high >= bar.open.max(bar.close)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let source = JsonDirSource::new("/nonexistent-dir");
        let err = source.load("wig20").unwrap_err();
        assert!(format!("{:#}", err).contains("WIG20.json"));
    }
}
