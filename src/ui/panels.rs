use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::{FAILURE_LABEL, SUCCESS_LABEL};
use crate::data::model::{PayloadRange, SiteSelector};
use crate::state::{Dashboard, PAYLOAD_SLIDER_STEP};

// ---------------------------------------------------------------------------
// Left side panel – site selector and payload range
// ---------------------------------------------------------------------------

/// Render the input controls. Changes go through the dashboard setters so
/// both charts are invalidated together.
pub fn side_panel(ui: &mut Ui, dashboard: &mut Dashboard) {
    ui.heading("Launch site");
    ui.separator();

    let sites = dashboard.dataset().sites.clone();
    let current = dashboard.site().clone();
    let mut selected = current.clone();

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(site_label(&current))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, SiteSelector::All, "All sites");
            for site in &sites {
                let value = SiteSelector::Site(site.clone());
                ui.selectable_value(&mut selected, value, site.as_str());
            }
        });

    if selected != current {
        dashboard.set_site(selected);
    }

    ui.add_space(12.0);
    ui.heading("Payload range (kg)");
    ui.separator();

    let (min, max) = dashboard.slider_bounds();
    let range = dashboard.payload_range();
    let (mut lo, mut hi) = (range.lo(), range.hi());

    // Values set in code (the dataset's min/max) stay off the step grid;
    // only dragging snaps to it.
    let lo_changed = ui
        .add(payload_slider(&mut lo, min, max).text("from"))
        .changed();
    let hi_changed = ui
        .add(payload_slider(&mut hi, min, max).text("to"))
        .changed();

    // The two handles may not cross: the one being dragged pushes the other.
    if lo_changed && lo > hi {
        hi = lo;
    }
    if hi_changed && hi < lo {
        lo = hi;
    }
    if lo_changed || hi_changed {
        dashboard.set_payload_range(PayloadRange::new(lo, hi));
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Full range").clicked() {
            let full = dashboard.dataset().full_payload_range();
            dashboard.set_payload_range(full);
        }
        if ui.small_button("Reset").clicked() {
            dashboard.set_site(SiteSelector::All);
            let full = dashboard.dataset().full_payload_range();
            dashboard.set_payload_range(full);
        }
    });
}

fn payload_slider(value: &mut f64, min: f64, max: f64) -> egui::Slider<'_> {
    egui::Slider::new(value, min..=max)
        .step_by(PAYLOAD_SLIDER_STEP)
        .clamping(egui::SliderClamping::Never)
}

fn site_label(site: &SiteSelector) -> String {
    match site {
        SiteSelector::All => "All sites".to_string(),
        SiteSelector::Site(s) => s.clone(),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, dashboard: &mut Dashboard) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(dashboard);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("SpaceX launch records dashboard");
        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} selected",
            dashboard.dataset().len(),
            dashboard.visible_indices().len()
        ));

        if let Some(msg) = &dashboard.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – records table
// ---------------------------------------------------------------------------

/// Table of the launches passing the current filters.
pub fn records_table(ui: &mut Ui, dashboard: &Dashboard) {
    let rows = dashboard.visible_indices();
    let records = &dashboard.dataset().records;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(130.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Flight", "Launch Site", "Payload (kg)", "Booster Version", "Category", "Outcome"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let rec = &records[rows[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(rec.flight_number.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.site.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.booster_version.as_str());
                });
                row.col(|ui: &mut Ui| {
                    let color = dashboard.booster_colors.color_for(&rec.booster_category);
                    ui.label(RichText::new(&rec.booster_category).color(color));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(if rec.outcome { SUCCESS_LABEL } else { FAILURE_LABEL });
                });
            });
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(dashboard: &mut Dashboard) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => dashboard.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                dashboard.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
