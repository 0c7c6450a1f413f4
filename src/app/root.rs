use {
    eframe::{
        Frame, Storage,
        egui::{Context, Key},
    },
    serde::{Deserialize, Serialize},
    std::sync::Arc,
};

use crate::{
    Cli,
    annotation::AnnotationEngine,
    app::LoadStatus,
    config::{DF, DrawingMode, constants::DEFAULT_TICKER},
    data::{BarLoader, BarSource, DemoSource, JsonDirSource, LoadOutcome},
    indicators::{IndicatorParams, IndicatorSet},
    models::BarSeries,
    ui::{ChartView, PlotMapper, PlotVisibility, setup_custom_visuals},
    utils::AppInstant,
};

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    pub(crate) ticker: String, // persists across sessions.
    pub(crate) plot_visibility: PlotVisibility,
    pub(crate) indicator_params: IndicatorParams,
    #[serde(skip)]
    pub(crate) ticker_input: String,
    #[serde(skip)]
    pub(crate) series: Option<BarSeries>,
    #[serde(skip)]
    pub(crate) indicators: IndicatorSet,
    #[serde(skip)]
    pub(crate) annotations: AnnotationEngine<PlotMapper>,
    #[serde(skip)]
    pub(crate) chart_view: ChartView,
    #[serde(skip)]
    pub(crate) loader: Option<BarLoader>,
    #[serde(skip)]
    pub(crate) status: LoadStatus,
}

impl Default for App {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            plot_visibility: PlotVisibility::default(),
            indicator_params: IndicatorParams::default(),
            ticker_input: String::new(),
            series: None,
            indicators: IndicatorSet::default(),
            annotations: AnnotationEngine::default(),
            chart_view: ChartView::default(),
            loader: None,
            status: LoadStatus::default(),
        }
    }
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        if let Some(ticker) = &args.ticker {
            app.ticker = ticker.clone();
        }

        app.loader = Some(BarLoader::new(Self::bar_source(&args)));
        let ticker = app.ticker.clone();
        app.load_ticker(&ticker);
        app
    }

    fn bar_source(args: &Cli) -> Arc<dyn BarSource> {
        if cfg!(target_arch = "wasm32") || args.demo {
            return Arc::new(DemoSource);
        }
        match &args.data_dir {
            Some(dir) => Arc::new(JsonDirSource::new(dir.clone())),
            None => Arc::new(JsonDirSource::default()),
        }
    }

    /// Starts loading `ticker`. The current chart stays up until the new bars
    /// arrive.
    pub(crate) fn load_ticker(&mut self, ticker: &str) {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return;
        }
        let Some(loader) = &mut self.loader else {
            return;
        };

        loader.request(&ticker);
        self.ticker_input = ticker.clone();
        self.status = LoadStatus::Loading(ticker);
    }

    pub(crate) fn source_name(&self) -> &str {
        self.loader.as_ref().map_or("-", |l| l.source_name())
    }

    fn poll_loader(&mut self, ctx: &Context) {
        let Some(loader) = &mut self.loader else {
            return;
        };
        if let Some(outcome) = loader.poll() {
            self.apply_load(outcome);
        }
        if self.status.is_loading() {
            ctx.request_repaint();
        }
    }

    fn apply_load(&mut self, outcome: LoadOutcome) {
        match outcome.result {
            Ok(series) if series.is_empty() => {
                self.series = None;
                self.status = LoadStatus::Empty(outcome.ticker);
            }
            Ok(series) => {
                let start = AppInstant::now();
                self.indicators = IndicatorSet::compute(&series, &self.indicator_params);
                if DF.log_loader {
                    log::info!(
                        "Loaded {} bars for {} (indicators in {}us)",
                        series.len(),
                        outcome.ticker,
                        start.elapsed().as_micros()
                    );
                }
                // Annotations belong to the chart they were drawn on
                self.annotations = AnnotationEngine::default();
                self.chart_view.request_fit();
                self.ticker = outcome.ticker;
                self.series = Some(series);
                self.status = LoadStatus::Ready;
            }
            Err(msg) => {
                log::error!("Failed to load {}: {}", outcome.ticker, msg);
                self.series = None;
                self.status = LoadStatus::Failed(msg);
            }
        }
    }

    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        // Typing in the ticker field must not trigger hotkeys
        if ctx.wants_keyboard_input() {
            return;
        }

        let (escape, delete, undo, redo) = ctx.input(|i| {
            let cmd = i.modifiers.command;
            (
                i.key_pressed(Key::Escape),
                i.key_pressed(Key::Delete),
                cmd && !i.modifiers.shift && i.key_pressed(Key::Z),
                cmd && (i.key_pressed(Key::Y) || (i.modifiers.shift && i.key_pressed(Key::Z))),
            )
        });

        if escape {
            if self.annotations.drawing_mode() != DrawingMode::None {
                self.annotations.set_drawing_mode(DrawingMode::None);
            } else {
                self.annotations.clear_selection();
            }
        }
        if delete {
            self.annotations.delete_selected();
        }
        if undo {
            self.annotations.undo();
        }
        if redo {
            self.annotations.redo();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        self.poll_loader(ctx);
        self.handle_global_shortcuts(ctx);

        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_shape_panel(ctx);
        self.render_central_panel(ctx);
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        #[cfg(debug_assertions)]
        if DF.log_loader {
            log::info!("Saving preferences (ticker {})", self.ticker);
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}
