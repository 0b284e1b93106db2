mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // No dashboard without data: a missing or malformed file ends the process.
    let table = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} packages from {} ({} of {} rows dropped)",
        table.len(),
        config.data_path.display(),
        table.report.rows_dropped,
        table.report.rows_read
    );

    let state = AppState::new(table, config.data_path.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
