mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use anyhow::Context;
use app::CarEdaApp;
use clap::Parser;
use config::{AppConfig, Args};
use data::loader::DatasetStore;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut state = AppState::new(AppConfig::from(&args), DatasetStore::new());

    // A dataset named on the command line must load, or startup aborts.
    if let Some(path) = &args.path {
        state
            .open(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Car Data EDA Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(CarEdaApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard: {e}"))
}
