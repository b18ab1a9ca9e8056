mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::SalesBoardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional first argument: path of the sales CSV to load at startup.
    let initial_path: Option<PathBuf> = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SalesBoard – Sales Performance Dashboard",
        options,
        Box::new(move |_cc| {
            let mut app = SalesBoardApp::default();
            if let Some(path) = initial_path {
                if let Err(e) = app.state.open_path(&path) {
                    log::error!("failed to load {}: {e}", path.display());
                    app.state.status_message = Some(format!("Error: {e}"));
                }
            }
            Ok(Box::new(app))
        }),
    )
}
