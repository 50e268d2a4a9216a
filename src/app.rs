use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new() -> Self {
        let mut state = AppState::default();
        state.try_load_default();
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: indicators, chart, raw data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.table.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a survey file to begin  (File → Open…)");
                });
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui: &mut egui::Ui| {
                let sel = &self.state.selection;
                ui.heading(format!("{} | {} | {}", sel.state, sel.survey, sel.area));
                ui.add_space(8.0);

                panels::indicator_tiles(ui, &self.state);
                ui.separator();

                plot::comparison_chart(ui, &mut self.state);
                ui.separator();

                ui.strong("Raw Data");
                table::raw_data_table(ui, &self.state);
            });
        });
    }
}
