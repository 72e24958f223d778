mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // The dataset is read exactly once; any failure stops us before the UI
    // comes up.
    let config = DashboardConfig::load().context("loading configuration")?;
    let ctx = match data::loader::load_context(&config.data_path, config.missing_payload) {
        Ok(ctx) => ctx,
        Err(e) => {
            log::error!("Failed to load launch data: {e}");
            return Err(anyhow::Error::new(e).context("building launch context"));
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let state = AppState::new(ctx, config);
    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
