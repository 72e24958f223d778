use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Outcome proportion chart
// ---------------------------------------------------------------------------

/// Share of each mission outcome for the selected site, one bar per outcome.
pub fn proportion_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.heading(state.proportion_title());

    let shares = state.proportions();
    if shares.is_empty() {
        ui.label("No launches for this selection.");
        return;
    }

    Plot::new("proportion_plot")
        .height(height)
        .legend(Legend::default())
        .y_axis_label("Share of launches (%)")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, share) in shares.iter().enumerate() {
                let color = state.colors.color_for(share.outcome);
                let bar = Bar::new(i as f64, share.fraction * 100.0)
                    .name(format!("{} ({})", share.outcome, share.count))
                    .fill(color);
                let chart = BarChart::new(vec![bar])
                    .name(share.outcome)
                    .color(color)
                    .width(0.7);
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart
// ---------------------------------------------------------------------------

/// Payload mass (x) against mission outcome (y), coloured by outcome.
pub fn scatter_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.heading(state.scatter_title());

    let points = state.scatter();

    // Infinite masses have no position on the axis.
    let mut by_outcome: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    let mut unplottable = 0usize;
    for point in &points {
        let Some(row) = state.colors.index_of(point.mission_outcome) else {
            continue;
        };
        if point.payload_mass_kg.is_finite() {
            by_outcome
                .entry(point.mission_outcome)
                .or_default()
                .push([point.payload_mass_kg, row as f64]);
        } else {
            unplottable += 1;
        }
    }

    if unplottable > 0 {
        ui.label(format!(
            "{unplottable} launches with classified payload mass are in range but not plotted."
        ));
    }

    let outcomes: Vec<String> = state.colors.outcomes().map(str::to_string).collect();

    Plot::new("scatter_plot")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Mission Outcome")
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            outcomes.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (outcome, coords) in by_outcome {
                let series: PlotPoints = coords.into_iter().collect();
                let scatter = Points::new(series)
                    .name(outcome)
                    .color(state.colors.color_for(outcome))
                    .radius(4.0);
                plot_ui.points(scatter);
            }
        });
}
