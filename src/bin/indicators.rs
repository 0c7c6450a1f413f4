use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use pin_chart::config::constants::DEFAULT_TICKER;
use pin_chart::data::load_bars_file;
use pin_chart::ui::{format_price, format_volume};
use pin_chart::utils::epoch_sec_to_date_string;
use pin_chart::{
    BarSeries, BarSource, DemoSource, IndicatorParams, IndicatorPoint, IndicatorSet,
    JsonDirSource,
};

/// Print the last rows of every indicator for one ticker.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bar file to read (JSON array of {time, open, high, low, close, volume})
    #[arg(long, conflicts_with = "data_dir")]
    file: Option<PathBuf>,

    /// Directory holding `<TICKER>.json` bar files. Without it (and without
    /// --file) the synthetic demo series is used.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_TICKER)]
    ticker: String,

    /// Number of most recent bars to print
    #[arg(long, default_value_t = 10)]
    last: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let series = load_series(&args)?;
    if series.is_empty() {
        bail!("Brak danych dla symbolu: {}", series.ticker);
    }

    let params = IndicatorParams::default();
    let set = IndicatorSet::compute(&series, &params);

    log::info!(
        "{}: {} bars, {} to {}",
        series.ticker,
        series.len(),
        epoch_sec_to_date_string(series.timestamps[0]),
        epoch_sec_to_date_string(series.timestamps[series.len() - 1])
    );

    println!("{}", build_table(&series, &set, args.last));
    Ok(())
}

fn load_series(args: &Args) -> Result<BarSeries> {
    if let Some(path) = &args.file {
        let bars = load_bars_file(path)?;
        let ticker = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&args.ticker)
            .to_uppercase();
        return Ok(BarSeries::from_bars(ticker, &bars));
    }

    let source: Box<dyn BarSource> = match &args.data_dir {
        Some(dir) => Box::new(JsonDirSource::new(dir.clone())),
        None => Box::new(DemoSource),
    };
    source
        .load(&args.ticker)
        .with_context(|| format!("Failed to load {} from {} source", args.ticker, source.name()))
}

fn value_at(points: &[IndicatorPoint], time: i64) -> String {
    points
        .binary_search_by_key(&time, |p| p.time)
        .map_or_else(|_| "-".to_string(), |i| format!("{:.2}", points[i].value))
}

fn build_table(series: &BarSeries, set: &IndicatorSet, last: usize) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["Data".to_string(), "Zamknięcie".to_string(), "Wolumen".to_string()];
    header.extend(set.moving_averages.iter().map(|ma| ma.spec.to_string()));
    header.extend(["RSI", "MACD", "Sygnał", "Histogram", "OBV"].map(String::from));
    builder.push_record(header);

    let start = series.len().saturating_sub(last);
    for bar in series.bars().skip(start) {
        let mut row = vec![
            epoch_sec_to_date_string(bar.time),
            format_price(bar.close),
            format_volume(bar.volume as f64),
        ];
        row.extend(set.moving_averages.iter().map(|ma| value_at(&ma.points, bar.time)));
        row.push(value_at(&set.rsi, bar.time));
        row.push(value_at(&set.macd.macd, bar.time));
        row.push(value_at(&set.macd.signal, bar.time));
        row.push(value_at(&set.macd.histogram, bar.time));
        row.push(
            set.obv
                .binary_search_by_key(&bar.time, |p| p.time)
                .map_or_else(|_| "-".to_string(), |i| format_volume(set.obv[i].value)),
        );
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
