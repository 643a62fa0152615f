use eframe::egui::{self, Ui};

use crate::data::model::LaunchDataset;
use crate::state::Dashboard;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SpacexDashApp {
    pub dashboard: Dashboard,
}

impl SpacexDashApp {
    pub fn new(dataset: LaunchDataset) -> Self {
        Self {
            dashboard: Dashboard::new(dataset),
        }
    }
}

impl eframe::App for SpacexDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // First frame after a (re)load: the top bar reads the selection.
        self.dashboard.refresh();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.dashboard);
        });

        // ---- Left side panel: inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.dashboard);
            });

        // Inputs for this frame are settled; rebuild whatever went stale.
        self.dashboard.refresh();

        // ---- Bottom panel: selected launches ----
        egui::TopBottomPanel::bottom("records_panel")
            .default_height(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::records_table(ui, &self.dashboard);
            });

        // ---- Central panel: pie + scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let dashboard = &self.dashboard;
            ui.columns(2, |cols: &mut [Ui]| {
                plot::pie_chart(&mut cols[0], &dashboard.pie, &dashboard.site_colors);
                plot::scatter_chart(&mut cols[1], &dashboard.scatter, &dashboard.booster_colors);
            });
        });
    }
}
