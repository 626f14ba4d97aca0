#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::PfrApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_title("PFR Simulator"),
        ..Default::default()
    };

    eframe::run_native(
        "PFR Simulator",
        options,
        Box::new(|cc| Ok(Box::new(PfrApp::new(cc)))),
    )
}
