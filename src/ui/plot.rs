use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Sales by category (horizontal bar chart)
// ---------------------------------------------------------------------------

/// Render the per-category sales bar chart. Bars appear bottom-to-top in the
/// summary's ascending-by-amount order, one colour per category.
pub fn category_bars(ui: &mut Ui, state: &AppState) {
    let table = &state.summary.category_sales;
    if table.is_empty() {
        empty_chart(ui, "Sales by Category");
        return;
    }

    let bars: Vec<Bar> = table
        .iter()
        .enumerate()
        .map(|(i, (category, amount))| {
            let color = state
                .colors
                .as_ref()
                .map(|cm| cm.color_for(category))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *amount)
                .name(category)
                .fill(color)
                .width(0.6)
        })
        .collect();

    let labels: Vec<String> = table.iter().map(|(c, _)| c.clone()).collect();

    Plot::new("category_bars")
        .y_axis_label("Category")
        .x_axis_label("Sale Amount")
        .y_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .name("Sales by Category"),
            );
        });
}

// ---------------------------------------------------------------------------
// Monthly sales trend (line chart with markers)
// ---------------------------------------------------------------------------

/// Render the monthly sales trend. The x axis is the chronological month
/// index, labelled `YYYY-MM`.
pub fn monthly_trend(ui: &mut Ui, state: &AppState) {
    let table = &state.summary.monthly_sales;
    if table.is_empty() {
        empty_chart(ui, "Monthly Sales Trend");
        return;
    }

    let points: PlotPoints = table
        .iter()
        .enumerate()
        .map(|(i, (_, amount))| [i as f64, *amount])
        .collect();
    let marker_points: PlotPoints = table
        .iter()
        .enumerate()
        .map(|(i, (_, amount))| [i as f64, *amount])
        .collect();

    let labels: Vec<String> = table.iter().map(|(m, _)| m.to_string()).collect();

    Plot::new("monthly_trend")
        .x_axis_label("Month")
        .y_axis_label("Sale Amount")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Monthly Sales")
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(marker_points)
                    .shape(MarkerShape::Circle)
                    .radius(4.0)
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

fn empty_chart(ui: &mut Ui, title: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading(format!("{title}: no data for the current filters"));
    });
}
