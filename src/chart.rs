use crate::data::model::{LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Chart specifications – what the plot widgets draw
// ---------------------------------------------------------------------------

pub const PIE_ALL_SITES_TITLE: &str = "Total successful launches by site";
pub const SUCCESS_LABEL: &str = "Success";
pub const FAILURE_LABEL: &str = "Failure";
pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_LABEL: &str = "Launch outcome";

/// One wedge of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Sum of all slice values.
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    #[cfg(test)]
    pub fn slice(&self, label: &str) -> Option<&PieSlice> {
        self.slices.iter().find(|s| s.label == label)
    }
}

/// Points sharing one booster category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub title: String,
    /// Payload window the points were selected with.
    pub payload_range: PayloadRange,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<ScatterSeries>,
}

#[cfg(test)]
impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Accumulate `(label, value)` pairs keeping labels in first-seen order.
fn accumulate<'a>(pairs: impl Iterator<Item = (&'a str, f64)>) -> Vec<PieSlice> {
    let mut slices: Vec<PieSlice> = Vec::new();
    for (label, value) in pairs {
        match slices.iter_mut().find(|s| s.label == label) {
            Some(slice) => slice.value += value,
            None => slices.push(PieSlice {
                label: label.to_string(),
                value,
            }),
        }
    }
    slices
}

/// Pie chart for the current selection.
///
/// * all sites  → one slice per site, weighted by the sum of its outcome
///   flags (its success count)
/// * one site   → one slice per outcome present, weighted by launch count
pub fn build_pie(subset: &[&LaunchRecord], site: &SiteSelector) -> PieChart {
    match site {
        SiteSelector::All => PieChart {
            title: PIE_ALL_SITES_TITLE.to_string(),
            slices: accumulate(
                subset
                    .iter()
                    .map(|r| (r.site.as_str(), f64::from(r.outcome_flag()))),
            ),
        },
        SiteSelector::Site(name) => PieChart {
            title: format!("Launch success for {name}."),
            slices: accumulate(subset.iter().map(|r| {
                let label = if r.outcome { SUCCESS_LABEL } else { FAILURE_LABEL };
                (label, 1.0)
            })),
        },
    }
}

/// Scatter of payload mass (x) against outcome (y = 0 or 1), one series per
/// booster category in first-seen order.
pub fn build_scatter(
    subset: &[&LaunchRecord],
    site: &SiteSelector,
    range: PayloadRange,
) -> ScatterChart {
    let mut series: Vec<ScatterSeries> = Vec::new();
    for rec in subset {
        let point = [rec.payload_mass_kg, f64::from(rec.outcome_flag())];
        match series.iter_mut().find(|s| s.name == rec.booster_category) {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                name: rec.booster_category.clone(),
                points: vec![point],
            }),
        }
    }

    ScatterChart {
        title: format!("Launch success for {site} according to payload and booster version."),
        payload_range: range,
        x_label: PAYLOAD_AXIS_LABEL,
        y_label: OUTCOME_AXIS_LABEL,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter;
    use crate::data::model::record;

    fn four_launches() -> Vec<LaunchRecord> {
        vec![
            record("A", 1000.0, "FT", true),
            record("A", 2000.0, "FT", false),
            record("B", 3000.0, "B4", true),
            record("B", 4000.0, "B5", true),
        ]
    }

    #[test]
    fn test_pie_all_sites_counts_successes_per_site() {
        let recs = four_launches();
        let subset: Vec<&LaunchRecord> = recs.iter().collect();
        let pie = build_pie(&subset, &SiteSelector::All);

        assert_eq!(pie.title, "Total successful launches by site");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "A".into(), value: 1.0 },
                PieSlice { label: "B".into(), value: 2.0 },
            ]
        );
        assert_eq!(pie.total(), 3.0);
    }

    #[test]
    fn test_pie_all_sites_keeps_site_without_successes() {
        let recs = vec![record("A", 100.0, "v1.0", false), record("B", 200.0, "FT", true)];
        let subset: Vec<&LaunchRecord> = recs.iter().collect();
        let pie = build_pie(&subset, &SiteSelector::All);

        assert_eq!(pie.slice("A").map(|s| s.value), Some(0.0));
        assert_eq!(pie.slice("B").map(|s| s.value), Some(1.0));
    }

    #[test]
    fn test_pie_single_site_counts_outcomes() {
        let recs = four_launches();
        let site = SiteSelector::Site("A".into());
        let subset = filter(&recs, &site, PayloadRange::new(0.0, 10000.0));
        let pie = build_pie(&subset, &site);

        assert_eq!(pie.title, "Launch success for A.");
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.slice(SUCCESS_LABEL).map(|s| s.value), Some(1.0));
        assert_eq!(pie.slice(FAILURE_LABEL).map(|s| s.value), Some(1.0));
    }

    #[test]
    fn test_pie_single_site_only_present_outcomes() {
        let recs = four_launches();
        let site = SiteSelector::Site("B".into());
        let subset = filter(&recs, &site, PayloadRange::new(0.0, 10000.0));
        let pie = build_pie(&subset, &site);

        assert_eq!(pie.slices, vec![PieSlice { label: SUCCESS_LABEL.into(), value: 2.0 }]);
    }

    #[test]
    fn test_empty_subset_gives_empty_charts() {
        let recs = four_launches();
        let range = PayloadRange::new(0.0, 0.0);
        let subset = filter(&recs, &SiteSelector::All, range);
        assert!(subset.is_empty());

        let pie = build_pie(&subset, &SiteSelector::All);
        assert!(pie.slices.is_empty());
        assert_eq!(pie.total(), 0.0);

        let scatter = build_scatter(&subset, &SiteSelector::All, range);
        assert!(scatter.series.is_empty());
        assert_eq!(scatter.point_count(), 0);
    }

    #[test]
    fn test_pie_unknown_site_is_empty() {
        let recs = four_launches();
        let site = SiteSelector::Site("C".into());
        let subset = filter(&recs, &site, PayloadRange::new(0.0, 10000.0));
        let pie = build_pie(&subset, &site);
        assert_eq!(pie.title, "Launch success for C.");
        assert!(pie.slices.is_empty());
    }

    #[test]
    fn test_scatter_groups_by_booster_category() {
        let recs = vec![
            record("A", 2500.0, "FT", true),
            record("B", 2500.0, "v1.1", false),
        ];
        let subset: Vec<&LaunchRecord> = recs.iter().collect();
        let range = PayloadRange::new(0.0, 10000.0);
        let scatter = build_scatter(&subset, &SiteSelector::All, range);

        assert_eq!(scatter.series.len(), 2);
        assert_eq!(scatter.series[0].name, "FT");
        assert_eq!(scatter.series[0].points, vec![[2500.0, 1.0]]);
        assert_eq!(scatter.series[1].name, "v1.1");
        assert_eq!(scatter.series[1].points, vec![[2500.0, 0.0]]);
        assert_eq!(scatter.payload_range, range);
    }

    #[test]
    fn test_scatter_titles() {
        let recs = four_launches();
        let subset: Vec<&LaunchRecord> = recs.iter().collect();
        let range = PayloadRange::new(0.0, 10000.0);

        let all = build_scatter(&subset, &SiteSelector::All, range);
        assert_eq!(
            all.title,
            "Launch success for ALL according to payload and booster version."
        );
        assert_eq!(all.x_label, "Payload Mass (kg)");
        assert_eq!(all.y_label, "Launch outcome");
        assert_eq!(all.point_count(), 4);

        let one = build_scatter(&subset, &SiteSelector::Site("B".into()), range);
        assert_eq!(
            one.title,
            "Launch success for B according to payload and booster version."
        );
    }
}
