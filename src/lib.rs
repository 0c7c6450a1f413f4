#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod annotation;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the indicators binary and tests)
pub use annotation::{AnnotationEngine, CoordinateMapper, LinearMapper};
pub use app::App;
pub use config::PERSISTENCE;
pub use data::{BarSource, DemoSource, JsonDirSource};
pub use domain::Bar;
pub use indicators::{IndicatorParams, IndicatorSet};
pub use models::{BarSeries, IndicatorPoint, IndicatorSeries};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `<TICKER>.json` bar files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Ticker to load on start-up instead of the last one used
    #[arg(long)]
    pub ticker: Option<String>,

    /// Use the built-in synthetic series instead of bar files
    #[arg(long, default_value_t = false)]
    pub demo: bool,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
