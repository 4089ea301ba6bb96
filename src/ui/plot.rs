use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::config::{CHART_COLOR, CHART_SERIES_LABEL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trend chart (bottom panel)
// ---------------------------------------------------------------------------

/// Render total jobs per year. Points sit at their position in the summary
/// table and the x axis is labelled with the years, so the line follows the
/// table's current order.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    let series = state.chart_series();
    if series.is_empty() {
        return;
    }

    let [r, g, b] = CHART_COLOR;
    let color = Color32::from_rgb(r, g, b);

    let coords: Vec<[f64; 2]> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v as f64])
        .collect();

    let labels = series.labels.clone();

    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(CHART_SERIES_LABEL)
        .include_x(0.0)
        .include_y(0.0)
        .x_axis_formatter(move |mark: GridMark, _range| year_label(&labels, mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name(CHART_SERIES_LABEL)
                    .color(color)
                    .width(1.5),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .name(CHART_SERIES_LABEL)
                    .color(color)
                    .radius(3.0),
            );
        });
}

/// Axis text for a grid mark: the year at that position, blank between
/// points.
fn year_label(labels: &[i64], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels
        .get(rounded as usize)
        .map(|y| y.to_string())
        .unwrap_or_default()
}
