mod app;
mod chart;
mod color;
mod config;
mod controller;
mod data;
mod error;
mod state;
mod ui;

use app::DashboardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = config::load_config();
    log::debug!("settings: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GSS 2018 – Survey Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(&config)))),
    )
}
