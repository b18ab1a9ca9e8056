use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export;
use crate::data::model::DIMENSIONS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the loop.
    let dataset = dataset.clone();
    let colors = state.colors.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in DIMENSIONS {
                let Some(all_values) = dataset.unique_values(dim) else {
                    continue;
                };

                let selected = state.filters.entry(dim.to_string()).or_default();

                // Show count of selected / total in the header
                let header_text =
                    format!("{dim}  ({}/{})", selected.len(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        // Select all / none buttons
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        for val in all_values {
                            let mut text = RichText::new(val);
                            // Category values carry their chart colour.
                            if dim == crate::data::model::DIM_CATEGORY {
                                if let Some(cm) = &colors {
                                    text = text.color(cm.color_for(val));
                                }
                            }

                            let mut checked = state
                                .filters
                                .get(dim)
                                .is_some_and(|allowed| allowed.contains(val));
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_filter_value(dim, val);
                            }
                        }
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
            if ui.button("Reload").clicked() {
                if let Err(e) = state.reload() {
                    log::error!("reload failed: {e}");
                    state.status_message = Some(format!("Error: {e}"));
                }
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export Filtered…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} orders loaded, {} after filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Render the three summary metrics above the charts.
pub fn kpi_row(ui: &mut Ui, state: &AppState) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Sales", &state.summary.total_sales_label());
        metric(
            &mut cols[1],
            "Total Orders",
            &state.summary.total_orders.to_string(),
        );
        metric(&mut cols[2], "Top Category", state.summary.top_category_label());
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).heading().strong());
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open_path(&path) {
            log::error!("failed to load file: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let Some(dataset) = state.dataset.clone() else {
        state.status_message = Some("Nothing to export: no dataset loaded.".to_string());
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name("filtered_sales.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let result = export::to_csv(&dataset, &state.visible_indices)
            .and_then(|text| {
                std::fs::write(&path, text)
                    .with_context(|| format!("writing {}", path.display()))
            });
        match result {
            Ok(()) => {
                log::info!(
                    "exported {} rows to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
