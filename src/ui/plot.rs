use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{FAILURE_LABEL, PieChart, SUCCESS_LABEL, ScatterChart};
use crate::color::ColorMap;
use crate::state::ChartRegion;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(44, 160, 44);
const FAILURE_COLOR: Color32 = Color32::from_rgb(214, 39, 40);

/// Wedges wider than this are split so every polygon stays convex.
const MAX_WEDGE_SPAN: f64 = 0.125;
/// Arc resolution: points per full turn.
const ARC_POINTS_PER_TURN: f64 = 96.0;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// One slice laid out on the unit circle.
#[derive(Debug, Clone)]
pub struct Wedge {
    pub label: String,
    /// Fraction of the whole pie, in `[0, 1]`.
    pub share: f64,
    /// Convex pieces making up the slice.
    pub polygons: Vec<Vec<[f64; 2]>>,
    /// Anchor for the percentage label.
    pub label_pos: [f64; 2],
}

fn unit_point(turn: f64, radius: f64) -> [f64; 2] {
    // Start at twelve o'clock and go clockwise.
    let angle = TAU * (0.25 - turn);
    [radius * angle.cos(), radius * angle.sin()]
}

fn arc_polygon(from: f64, to: f64) -> Vec<[f64; 2]> {
    let steps = (((to - from) * ARC_POINTS_PER_TURN).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        points.push(unit_point(from + (to - from) * i as f64 / steps as f64, 1.0));
    }
    points
}

/// Lay out the slices of `chart` around the unit circle. Zero-valued slices
/// and charts with a zero total produce no wedges.
pub fn pie_wedges(chart: &PieChart) -> Vec<Wedge> {
    let total = chart.total();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    let mut wedges = Vec::new();
    for slice in &chart.slices {
        let share = slice.value / total;
        if share <= 0.0 {
            continue;
        }
        let end = start + share;

        let pieces = (share / MAX_WEDGE_SPAN).ceil().max(1.0) as usize;
        let polygons = (0..pieces)
            .map(|k| {
                let from = start + share * k as f64 / pieces as f64;
                let to = start + share * (k + 1) as f64 / pieces as f64;
                arc_polygon(from, to)
            })
            .collect();

        wedges.push(Wedge {
            label: slice.label.clone(),
            share,
            polygons,
            label_pos: unit_point(start + share / 2.0, 0.65),
        });
        start = end;
    }
    wedges
}

// ---------------------------------------------------------------------------
// Chart widgets
// ---------------------------------------------------------------------------

fn chart_header(ui: &mut Ui, title: &str, subtitle: Option<String>) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(title).strong().size(16.0));
        if let Some(sub) = subtitle {
            ui.label(RichText::new(sub).weak());
        }
    });
}

fn slice_color(label: &str, site_colors: &ColorMap) -> Color32 {
    match label {
        SUCCESS_LABEL => SUCCESS_COLOR,
        FAILURE_LABEL => FAILURE_COLOR,
        site => site_colors.color_for(site),
    }
}

/// Render the outcome pie chart.
pub fn pie_chart(ui: &mut Ui, region: &ChartRegion<PieChart>, site_colors: &ColorMap) {
    let Some(chart) = region.rendered() else {
        ui.spinner();
        return;
    };

    chart_header(ui, &chart.title, None);
    let wedges = pie_wedges(chart);

    Plot::new("success_pie_chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let color = slice_color(&wedge.label, site_colors);
                for poly in &wedge.polygons {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(poly.clone()))
                            .name(&wedge.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(wedge.label_pos[0], wedge.label_pos[1]),
                        RichText::new(format!("{:.1}%", wedge.share * 100.0))
                            .color(Color32::WHITE)
                            .strong(),
                    )
                    .name(&wedge.label),
                );
            }
        });
}

/// Render the payload / outcome scatter chart.
pub fn scatter_chart(ui: &mut Ui, region: &ChartRegion<ScatterChart>, booster_colors: &ColorMap) {
    let Some(chart) = region.rendered() else {
        ui.spinner();
        return;
    };

    chart_header(ui, &chart.title, Some(format!("Payload {}", chart.payload_range)));

    Plot::new("success_payload_scatter_chart")
        .legend(Legend::default())
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .include_x(chart.payload_range.lo())
        .include_x(chart.payload_range.hi())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.name)
                    .color(booster_colors.color_for(&series.name))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(5.0);
                plot_ui.points(points);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::PieSlice;

    fn pie(values: &[(&str, f64)]) -> PieChart {
        PieChart {
            title: String::new(),
            slices: values
                .iter()
                .map(|(label, value)| PieSlice { label: label.to_string(), value: *value })
                .collect(),
        }
    }

    #[test]
    fn test_wedge_shares_sum_to_one() {
        let wedges = pie_wedges(&pie(&[("A", 1.0), ("B", 2.0), ("C", 1.0)]));
        assert_eq!(wedges.len(), 3);
        let total: f64 = wedges.iter().map(|w| w.share).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((wedges[1].share - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_large_wedges_are_split() {
        let wedges = pie_wedges(&pie(&[("A", 1.0)]));
        assert_eq!(wedges[0].polygons.len(), 8);
        for poly in &wedges[0].polygons {
            assert_eq!(poly[0], [0.0, 0.0]);
            assert!(poly.len() >= 3);
        }
    }

    #[test]
    fn test_zero_total_has_no_wedges() {
        assert!(pie_wedges(&pie(&[])).is_empty());
        assert!(pie_wedges(&pie(&[("A", 0.0), ("B", 0.0)])).is_empty());
    }

    #[test]
    fn test_zero_slice_skipped() {
        let wedges = pie_wedges(&pie(&[("A", 0.0), ("B", 3.0)]));
        assert_eq!(wedges.len(), 1);
        assert_eq!(wedges[0].label, "B");
    }

    #[test]
    fn test_first_wedge_starts_at_twelve_oclock() {
        let wedges = pie_wedges(&pie(&[("A", 1.0), ("B", 1.0)]));
        let first_arc_point = wedges[0].polygons[0][1];
        assert!(first_arc_point[0].abs() < 1e-12);
        assert!((first_arc_point[1] - 1.0).abs() < 1e-12);
        // First half sits on the right of the pie.
        assert!(wedges[0].label_pos[0] > 0.0);
        assert!(wedges[1].label_pos[0] < 0.0);
    }
}
