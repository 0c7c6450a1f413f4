use eframe::egui::{Context, Visuals};

use crate::ui::ui_config::UI_CONFIG;

/// Prices on GPW are quoted to two decimals; penny stocks get four.
pub fn format_price(price: f64) -> String {
    if price.abs() >= 1.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.4}", price)
    }
}

/// Compact volume: 1.2M, 350k, 999.
pub fn format_volume(volume: f64) -> String {
    let abs = volume.abs();
    if abs >= 1_000_000_000.0 {
        format!("{:.1}B", volume / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{:.1}M", volume / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.0}k", volume / 1_000.0)
    } else {
        format!("{:.0}", volume)
    }
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_precision_depends_on_magnitude() {
        assert_eq!(format_price(2345.678), "2345.68");
        assert_eq!(format_price(0.56789), "0.5679");
    }

    #[test]
    fn volume_is_abbreviated() {
        assert_eq!(format_volume(1_230_000.0), "1.2M");
        assert_eq!(format_volume(-35_000.0), "-35k");
        assert_eq!(format_volume(999.0), "999");
    }
}
