mod annotation_painter;
mod plot_layers;
mod plot_mapper;
mod styles;
mod ui_config;
mod ui_plot_view;
mod ui_render;
mod ui_text;
mod utils;

pub(crate) use ui_config::UI_CONFIG;
pub(crate) use ui_plot_view::PlotVisibility;

pub use plot_mapper::PlotMapper;
pub use ui_plot_view::ChartView;
pub use utils::{format_price, format_volume, setup_custom_visuals};
