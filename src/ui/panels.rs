use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::extract_indicator;
use crate::data::schema;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selector widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one combo box per selector dimension,
/// candidate lists taken from the table's sorted distinct values.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    selector_combo(
        ui,
        state,
        "Select State / UT",
        "state_select",
        &table.distinct(schema::canonical::STATE),
        Which::State,
    );
    ui.add_space(8.0);
    selector_combo(
        ui,
        state,
        "Select Survey",
        "survey_select",
        &table.distinct(schema::canonical::SURVEY),
        Which::Survey,
    );
    ui.add_space(8.0);
    selector_combo(
        ui,
        state,
        "Select Area",
        "area_select",
        &table.distinct(schema::canonical::AREA),
        Which::Area,
    );
}

enum Which {
    State,
    Survey,
    Area,
}

fn selector_combo(
    ui: &mut Ui,
    state: &mut AppState,
    label: &str,
    id: &str,
    values: &[String],
    which: Which,
) {
    ui.strong(label);
    let current = match which {
        Which::State => state.selection.state.clone(),
        Which::Survey => state.selection.survey.clone(),
        Which::Area => state.selection.area.clone(),
    };
    egui::ComboBox::from_id_salt(id)
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for value in values {
                if ui.selectable_label(current == *value, value).clicked() {
                    match which {
                        Which::State => state.set_state(value.clone()),
                        Which::Survey => state.set_survey(value.clone()),
                        Which::Area => state.set_area(value.clone()),
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Key indicator tiles
// ---------------------------------------------------------------------------

/// Render the three key-indicator tiles for the current subset. Values are
/// derived here on every frame; a value that cannot be produced shows as
/// "N/A" rather than failing.
pub fn indicator_tiles(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    ui.strong("Key Indicators");
    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        for indicator in schema::INDICATORS {
            let value = extract_indicator(table, &state.filtered, indicator.column);
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(RichText::new(indicator.label).small());
                    ui.heading(value.to_string());
                });
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows loaded, {} matching",
                table.len(),
                state.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
