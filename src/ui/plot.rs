use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::data::schema;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// State-wise comparison chart
// ---------------------------------------------------------------------------

/// Render the cross-state comparison: an indicator chooser plus one bar
/// per state with a usable value. States whose value is missing get no
/// bar; an empty series renders an empty plot.
pub fn comparison_chart(ui: &mut Ui, state: &mut AppState) {
    ui.strong("State-wise Comparison");
    ui.add_space(4.0);

    let current = schema::INDICATORS[state.compare_indicator];
    egui::ComboBox::from_id_salt("compare_indicator")
        .selected_text(current.label)
        .show_ui(ui, |ui: &mut Ui| {
            for (i, indicator) in schema::INDICATORS.iter().enumerate() {
                if ui
                    .selectable_label(i == state.compare_indicator, indicator.label)
                    .clicked()
                {
                    state.set_compare_indicator(i);
                }
            }
        });

    let Some(series) = &state.comparison else {
        return;
    };

    let states: Vec<String> = series.points.iter().map(|(s, _)| s.clone()).collect();

    let bars: Vec<Bar> = series
        .points
        .iter()
        .enumerate()
        .filter_map(|(i, (name, value))| {
            value.map(|v| {
                let color = state
                    .state_colors
                    .as_ref()
                    .map(|colors| colors.color_for(name))
                    .unwrap_or(egui::Color32::LIGHT_BLUE);
                Bar::new(i as f64, v).name(name).fill(color)
            })
        })
        .collect();

    let chart = BarChart::new(bars).width(0.7);

    Plot::new("comparison_chart")
        .height(320.0)
        .y_axis_label(current.label)
        .x_axis_formatter(move |mark, _range| {
            let index = mark.value.round();
            if (mark.value - index).abs() > 1e-6 || index < 0.0 {
                return String::new();
            }
            states.get(index as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
