use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SalesBoardApp {
    pub state: AppState,
}

impl eframe::App for SalesBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a sales CSV to begin  (File → Open…)");
                });
                return;
            }

            panels::kpi_row(ui, &self.state);
            ui.separator();

            let chart_height = ui.available_height();
            ui.columns(2, |cols: &mut [egui::Ui]| {
                cols[0].set_min_height(chart_height);
                plot::category_bars(&mut cols[0], &self.state);
                cols[1].set_min_height(chart_height);
                plot::monthly_trend(&mut cols[1], &self.state);
            });
        });
    }
}
