use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SalaryLensApp {
    pub state: AppState,
}

impl SalaryLensApp {
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::default();
        if let Some(path) = &config.initial_file {
            state.load_path(path);
        }
        Self { state }
    }
}

impl eframe::App for SalaryLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: job titles of the selected year ----
        if self.state.details_visible() {
            egui::SidePanel::right("detail_panel")
                .default_width(280.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::detail_table(ui, &self.state);
                });
        }

        // ---- Bottom panel: trend chart ----
        egui::TopBottomPanel::bottom("chart_panel")
            .default_height(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                plot::trend_plot(ui, &self.state);
            });

        // ---- Central panel: summary table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::summary_table(ui, &mut self.state);
        });
    }
}
