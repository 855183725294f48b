#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod canvas;

use std::path::{Path, PathBuf};

use app::AquaflowApp;
use aq_core::AppConfig;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load_or_default(Path::new("aquaflow.yaml"));
    let startup_path = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.resolution.width as f32,
                config.resolution.height as f32,
            ])
            .with_title("Aquaflow"),
        ..Default::default()
    };

    eframe::run_native(
        "Aquaflow",
        options,
        Box::new(move |cc| Ok(Box::new(AquaflowApp::new(cc, config, startup_path)))),
    )
}
