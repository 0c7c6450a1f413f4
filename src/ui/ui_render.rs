use eframe::egui::{
    Button, CentralPanel, Color32, Context, FontId, Key, RichText, ScrollArea, SidePanel,
    TextEdit, TopBottomPanel, Ui,
};
use strum::IntoEnumIterator;

use crate::app::{App, LoadStatus};
use crate::config::constants::INDEX_TICKERS;
use crate::config::plot::PLOT_CONFIG;
use crate::config::DrawingMode;
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_config::{UI_CONFIG, UI_TEXT};
use crate::ui::utils::format_price;

impl App {
    pub(crate) fn render_top_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.top_panel_frame();

        TopBottomPanel::top("top_toolbar")
            .frame(frame)
            .min_height(30.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    self.render_ticker_controls(ui);
                    ui.separator();
                    self.render_drawing_controls(ui);
                    ui.separator();
                    self.render_edit_controls(ui);
                    ui.separator();

                    // PANE VISIBILITY
                    let vis = &mut self.plot_visibility;
                    ui.checkbox(&mut vis.moving_averages, UI_TEXT.tb_moving_averages.as_str());
                    ui.checkbox(&mut vis.volume, UI_TEXT.tb_volume.as_str());
                    ui.checkbox(&mut vis.rsi, UI_TEXT.tb_rsi.as_str());
                    ui.checkbox(&mut vis.macd, UI_TEXT.tb_macd.as_str());
                    ui.checkbox(&mut vis.obv, UI_TEXT.tb_obv.as_str());
                });
            });
    }

    fn render_ticker_controls(&mut self, ui: &mut Ui) {
        ui.label(UI_TEXT.tb_ticker.as_str());
        let field = ui.add(
            TextEdit::singleline(&mut self.ticker_input)
                .desired_width(UI_CONFIG.ticker_field_width)
                .hint_text(self.ticker.as_str()),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        let loading = self.status.is_loading();
        if ui.add_enabled(!loading, Button::new(UI_TEXT.tb_load.as_str())).clicked() || submitted {
            let ticker = self.ticker_input.clone();
            self.load_ticker(&ticker);
        }

        ui.label(UI_TEXT.tb_indices.as_str());
        for index in INDEX_TICKERS {
            let current = self.ticker == *index;
            if ui.selectable_label(current, *index).clicked() && !current {
                self.load_ticker(index);
            }
        }
    }

    fn render_drawing_controls(&mut self, ui: &mut Ui) {
        ui.label(UI_TEXT.tb_drawing.as_str());
        let current = self.annotations.drawing_mode();
        for mode in DrawingMode::iter() {
            if ui
                .selectable_label(current == mode, mode.to_string())
                .clicked()
            {
                self.annotations.set_drawing_mode(mode);
            }
        }
    }

    fn render_edit_controls(&mut self, ui: &mut Ui) {
        let annotations = &mut self.annotations;

        if ui
            .add_enabled(annotations.can_undo(), Button::new(UI_TEXT.tb_undo.as_str()))
            .on_hover_text("Ctrl+Z")
            .clicked()
        {
            annotations.undo();
        }
        if ui
            .add_enabled(annotations.can_redo(), Button::new(UI_TEXT.tb_redo.as_str()))
            .on_hover_text("Ctrl+Y")
            .clicked()
        {
            annotations.redo();
        }
        if ui
            .add_enabled(
                annotations.selected_id().is_some(),
                Button::new(UI_TEXT.tb_delete.as_str()),
            )
            .on_hover_text("Delete")
            .clicked()
        {
            annotations.delete_selected();
        }
        if ui
            .add_enabled(
                !annotations.shapes().is_empty(),
                Button::new(UI_TEXT.tb_clear.as_str()),
            )
            .clicked()
        {
            annotations.clear_all();
        }
    }

    pub(crate) fn render_shape_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.side_panel_frame();

        SidePanel::left("shape_panel")
            .min_width(UI_CONFIG.shape_list_width)
            .resizable(false)
            .frame(frame)
            .show(ctx, |ui| {
                ui.label_subheader(UI_TEXT.sl_heading.as_str());
                ui.separator();

                let rows: Vec<(String, Color32)> = self
                    .annotations
                    .shapes()
                    .iter()
                    .map(|s| (s.id.clone(), s.style.color))
                    .collect();

                if rows.is_empty() {
                    ui.label_subdued(UI_TEXT.sl_empty.as_str());
                    return;
                }

                let selected = self.annotations.selected_id().map(str::to_owned);
                let mut to_select = None;
                let mut to_delete = None;

                ScrollArea::vertical().id_salt("shape_list").show(ui, |ui| {
                    for (id, color) in &rows {
                        ui.horizontal(|ui| {
                            let is_selected = selected.as_deref() == Some(id.as_str());
                            if ui
                                .interactive_label(id, is_selected, *color, FontId::proportional(13.0))
                                .clicked()
                            {
                                to_select = Some(id.clone());
                            }
                            if ui
                                .small_button("✖")
                                .on_hover_text(UI_TEXT.sl_delete_hover.as_str())
                                .clicked()
                            {
                                to_delete = Some(id.clone());
                            }
                        });
                    }
                });

                if let Some(id) = to_select {
                    self.annotations.select_shape(&id);
                }
                if let Some(id) = to_delete {
                    self.annotations.delete_shape(&id);
                }
            });
    }

    pub(crate) fn render_status_panel(&mut self, ctx: &Context) {
        let frame = UI_CONFIG.bottom_panel_frame();
        TopBottomPanel::bottom("status_panel")
            .frame(frame)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    self.render_status_load(ui);
                    ui.separator();
                    self.render_status_drawing(ui);
                });
            });
    }

    fn render_status_load(&self, ui: &mut Ui) {
        ui.metric(UI_TEXT.st_source.as_str(), self.source_name(), PLOT_CONFIG.color_text_neutral);

        match &self.status {
            LoadStatus::Loading(ticker) => {
                ui.spinner();
                ui.label_subdued(format!("{} {}...", UI_TEXT.st_loading, ticker));
            }
            LoadStatus::Failed(msg) => {
                ui.label(
                    RichText::new(format!("{} {}", UI_TEXT.st_error_prefix, msg))
                        .small()
                        .color(PLOT_CONFIG.color_warning),
                );
            }
            LoadStatus::Idle | LoadStatus::Ready | LoadStatus::Empty(_) => {}
        }

        if let Some(series) = &self.series {
            ui.metric(
                &series.ticker,
                &format!("{} {}", series.len(), UI_TEXT.st_bars),
                PLOT_CONFIG.color_text_neutral,
            );
            if let Some(close) = series.last_close() {
                ui.label(RichText::new(format_price(close)).strong());
            }
        }
    }

    fn render_status_drawing(&self, ui: &mut Ui) {
        let annotations = &self.annotations;

        if let Some(kind) = annotations.drawing_mode().shape_kind() {
            ui.label_subdued(kind.to_string());
            ui.metric(
                UI_TEXT.st_pending_clicks.as_str(),
                &format!("{}/{}", annotations.pending_points().len(), kind.clicks_required()),
                PLOT_CONFIG.shape_color(kind),
            );
            ui.label_subdued(UI_TEXT.st_hint_cancel.as_str());
        } else if annotations.is_dragging() {
            ui.label_subdued(UI_TEXT.st_dragging.as_str());
        }

        if let Some(id) = annotations.hovered_id() {
            let color = annotations
                .shape(id)
                .map_or(PLOT_CONFIG.color_text_neutral, |s| s.style.color);
            ui.label(RichText::new(id).small().color(color));
        }
    }

    pub(crate) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = UI_CONFIG.central_panel_frame();

        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                if let Some(series) = &self.series {
                    self.chart_view.show(
                        ui,
                        series,
                        &self.indicators,
                        &self.plot_visibility,
                        &mut self.annotations,
                    );
                    return;
                }

                match &self.status {
                    LoadStatus::Idle => {}
                    LoadStatus::Loading(ticker) => render_fullscreen_message(
                        ui,
                        &format!("{} {}...", UI_TEXT.st_loading, ticker),
                        "",
                        false,
                    ),
                    LoadStatus::Empty(ticker) => render_fullscreen_message(
                        ui,
                        &format!("{} {}", UI_TEXT.st_no_data, ticker),
                        "",
                        true,
                    ),
                    LoadStatus::Failed(msg) => {
                        render_fullscreen_message(ui, UI_TEXT.st_error_prefix.as_str(), msg, true)
                    }
                    // A chart is always present once a load succeeded
                    LoadStatus::Ready => {}
                }
            });
    }
}

fn render_fullscreen_message(ui: &mut Ui, title: &str, subtitle: &str, is_error: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);

        if is_error {
            ui.heading(format!("⚠ {}", title));
        } else {
            ui.spinner();
            ui.add_space(12.0);
            ui.heading(title);
        }

        ui.add_space(6.0);

        let color = if is_error {
            PLOT_CONFIG.color_warning
        } else {
            PLOT_CONFIG.color_text_neutral
        };

        ui.label(RichText::new(subtitle).color(color));
    });
}
