use eframe::egui::{self, RichText, Slider, Ui};

use crate::data::model::SiteSelector;
use crate::state::AppState;
use crate::ui::format_mass;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the site drop-down and the payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Site drop-down ----
    ui.strong("Launch site");
    let current = state.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.selector().to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in SiteSelector::options() {
                let value = option.value();
                if ui.selectable_label(current == value, option.to_string()).clicked() {
                    state.select_site(value);
                }
            }
        });
    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload Mass Range (kg):");
    let (min, max, step) = (
        state.config.slider_min,
        state.config.slider_max,
        state.config.slider_step,
    );

    // Sliders show clamped copies so an infinite bound survives until the
    // user actually drags the handle.
    let mut low = state.range.low.clamp(min, max);
    if ui
        .add(Slider::new(&mut low, min..=max).step_by(step).text("from"))
        .changed()
    {
        state.set_range_low(low);
    }

    let mut high = state.range.high.clamp(min, max);
    if ui
        .add(Slider::new(&mut high, min..=max).step_by(step).text("to"))
        .changed()
    {
        state.set_range_high(high);
    }

    ui.label(format!(
        "[{}, {}]",
        format_mass(state.range.low),
        format_mass(state.range.high)
    ));

    if let Some(bounds) = state.context().bounds() {
        if ui.small_button("Reset to full range").clicked() {
            state.range = bounds.as_range();
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with a short dataset summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(28.0)
                .color(egui::Color32::from_rgb(0x50, 0x3D, 0x36))
                .strong(),
        );
    });

    let ctx = state.context();
    let summary = match ctx.bounds() {
        Some(bounds) => format!(
            "{} launches loaded, payload {} – {} kg",
            ctx.len(),
            format_mass(bounds.min),
            format_mass(bounds.max)
        ),
        None => format!("{} launches loaded, no payload values", ctx.len()),
    };
    ui.label(summary);
}
