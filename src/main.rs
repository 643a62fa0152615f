mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, anyhow};
use app::SpacexDashApp;
use eframe::egui;

/// Cleaned launch table, read from the working directory.
const DATASET_PATH: &str = "spacex_launch_dash.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // No dataset, no dashboard.
    let dataset = data::loader::load_file(Path::new(DATASET_PATH))
        .context("the dashboard needs its launch dataset to start")?;
    if dataset.is_empty() {
        log::warn!("{DATASET_PATH} holds no launches; charts will stay empty");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SpacexDashApp::new(dataset)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
