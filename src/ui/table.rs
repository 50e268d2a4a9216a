use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Raw data grid
// ---------------------------------------------------------------------------

/// Render the filtered subset as a plain grid, one column per table
/// column, in table order.
pub fn raw_data_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    if state.filtered.is_empty() {
        ui.label("No rows match the current selection.");
        return;
    }

    ScrollArea::horizontal()
        .id_salt("raw_data_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(80.0), table.columns.len())
                .header(20.0, |mut header| {
                    for col in &table.columns {
                        header.col(|ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|mut body| {
                    for &idx in &state.filtered {
                        body.row(18.0, |mut row| {
                            for col in &table.columns {
                                row.col(|ui| {
                                    let text = table.rows[idx]
                                        .get(col)
                                        .map(|cell| cell.to_string())
                                        .unwrap_or_default();
                                    ui.label(text);
                                });
                            }
                        });
                    }
                });
        });
}
