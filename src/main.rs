mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::BikeDashboardApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = config::Args::parse();

    // Without the dataset there is nothing to show: fail before opening a window.
    let dataset = data::loader::load_file(&args.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e:#}", args.data.display()))
        .with_context(|| format!("loading dataset {}", args.data.display()))?;
    let state = AppState::new(dataset, args.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(BikeDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
