mod bar_source;
mod loader;

pub use bar_source::{
    BarSource, DemoSource, JsonDirSource, demo_bars, load_bars_file, parse_bars_json,
};
pub use loader::{BarLoader, LoadOutcome};
