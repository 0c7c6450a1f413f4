use std::sync::LazyLock;

pub struct UiText {
    // --- TOOLBAR ---
    pub tb_ticker: String,
    pub tb_load: String,
    pub tb_indices: String,
    pub tb_drawing: String,
    pub tb_undo: String,
    pub tb_redo: String,
    pub tb_delete: String,
    pub tb_clear: String,
    pub tb_volume: String,
    pub tb_moving_averages: String,
    pub tb_rsi: String,
    pub tb_macd: String,
    pub tb_obv: String,

    // --- SHAPE LIST ---
    pub sl_heading: String,
    pub sl_empty: String,
    pub sl_delete_hover: String,

    // --- PLOT LABELS ---
    pub plot_title_prefix: String,
    pub plot_y_axis: String,
    pub plot_volume: String,
    pub plot_macd_signal: String,
    pub plot_macd_histogram: String,

    // --- STATUS ---
    pub st_loading: String,
    pub st_no_data: String,
    pub st_error_prefix: String,
    pub st_source: String,
    pub st_bars: String,
    pub st_pending_clicks: String,
    pub st_dragging: String,
    pub st_hint_cancel: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    tb_ticker: "Spółka:".to_string(),
    tb_load: "Załaduj".to_string(),
    tb_indices: "Indeksy:".to_string(),
    tb_drawing: "Rysuj:".to_string(),
    tb_undo: "⟲ Cofnij".to_string(),
    tb_redo: "⟳ Ponów".to_string(),
    tb_delete: "Usuń zaznaczony".to_string(),
    tb_clear: "Wyczyść wszystko".to_string(),
    tb_volume: "Wolumen".to_string(),
    tb_moving_averages: "Średnie".to_string(),
    tb_rsi: "RSI".to_string(),
    tb_macd: "MACD".to_string(),
    tb_obv: "OBV".to_string(),

    sl_heading: "Narysowane obiekty".to_string(),
    sl_empty: "Brak obiektów".to_string(),
    sl_delete_hover: "Usuń".to_string(),

    plot_title_prefix: "Wykres cenowy dla".to_string(),
    plot_y_axis: "Cena".to_string(),
    plot_volume: "Wolumen".to_string(),
    plot_macd_signal: "Sygnał".to_string(),
    plot_macd_histogram: "Histogram".to_string(),

    st_loading: "Ładowanie danych dla:".to_string(),
    st_no_data: "Brak danych do wyświetlenia dla:".to_string(),
    st_error_prefix: "Błąd:".to_string(),
    st_source: "Źródło:".to_string(),
    st_bars: "świec".to_string(),
    st_pending_clicks: "Kliknięcia:".to_string(),
    st_dragging: "Przeciąganie".to_string(),
    st_hint_cancel: "Esc anuluje rysowanie".to_string(),
});
