use eframe::egui::{self, Align, Layout, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::sort::SortKey;
use crate::data::summary::format_average;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Summary table (central panel)
// ---------------------------------------------------------------------------

/// Render the per-year summary. Header buttons sort, row clicks drill down.
pub fn summary_table(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view salaries  (File → Open…)");
        });
        return;
    }

    // Collected while drawing, applied once the table is done.
    let mut sort_request: Option<usize> = None;
    let mut year_request: Option<i64> = None;

    TableBuilder::new(ui)
        .striped(true)
        .sense(Sense::click())
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            for (index, key) in SortKey::ALL.into_iter().enumerate() {
                header.col(|ui| {
                    let arrow = state
                        .sort_toggles
                        .current(key)
                        .map(|dir| dir.indicator())
                        .unwrap_or("");
                    let text = RichText::new(format!("{} {arrow}", key.label())).strong();
                    if ui.button(text).clicked() {
                        sort_request = Some(index);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.summary.len(), |mut row| {
                let item = state.summary[row.index()];
                row.set_selected(state.selected_year == Some(item.year));
                row.col(|ui| {
                    ui.label(item.year.to_string());
                });
                row.col(|ui| {
                    ui.label(item.total_jobs.to_string());
                });
                row.col(|ui| {
                    ui.label(format_average(item.average_salary));
                });
                if row.response().clicked() {
                    year_request = Some(item.year);
                }
            });
        });

    if let Some(index) = sort_request {
        if let Err(e) = state.sort_by_column(index) {
            log::warn!("Ignoring sort request: {e}");
        }
    }
    if let Some(year) = year_request {
        state.select_year(year);
    }
}

// ---------------------------------------------------------------------------
// Detail table (right panel)
// ---------------------------------------------------------------------------

/// Render the job-title breakdown of the selected year.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let Some(year) = state.selected_year else {
        return;
    };

    ui.heading(format!("Job titles in {year}"));
    ui.separator();

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::remainder())
        .column(Column::auto().at_least(60.0))
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Job Title");
            });
            header.col(|ui| {
                ui.strong("Count");
            });
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.details.len(), |mut row| {
                let detail = &state.details[row.index()];
                row.col(|ui| {
                    ui.add(egui::Label::new(&detail.job_title).truncate());
                });
                row.col(|ui| {
                    ui.label(detail.count.to_string());
                });
            });
        });
}
