use crate::chart::{PieChart, ScatterChart, build_pie, build_scatter};
use crate::color::ColorMap;
use crate::data::filter::filtered_indices;
use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelector};

/// Slider bounds for the payload range control.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

// ---------------------------------------------------------------------------
// Chart region: stale until the next refresh renders it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ChartRegion<T> {
    Stale,
    Rendered(T),
}

impl<T> Default for ChartRegion<T> {
    fn default() -> Self {
        ChartRegion::Stale
    }
}

impl<T> ChartRegion<T> {
    pub fn is_stale(&self) -> bool {
        matches!(self, ChartRegion::Stale)
    }

    pub fn rendered(&self) -> Option<&T> {
        match self {
            ChartRegion::Stale => None,
            ChartRegion::Rendered(chart) => Some(chart),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Inputs change only through [`Dashboard::set_site`] and
/// [`Dashboard::set_payload_range`]; either one marks both charts stale and
/// [`Dashboard::refresh`] rebuilds them.
#[derive(Debug, Default)]
pub struct Dashboard {
    /// Loaded dataset; read-only once installed.
    dataset: LaunchDataset,

    site: SiteSelector,
    payload_range: PayloadRange,

    pub pie: ChartRegion<PieChart>,
    pub scatter: ChartRegion<ScatterChart>,

    /// Indices of launches passing the filters as of the last refresh.
    visible_indices: Vec<usize>,

    /// Colours per site (pie) and per booster category (scatter).
    pub site_colors: ColorMap,
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Dashboard {
    pub fn new(dataset: LaunchDataset) -> Self {
        let mut dashboard = Dashboard::default();
        dashboard.set_dataset(dataset);
        dashboard
    }

    /// Install a dataset, reset inputs to their defaults and rebuild colours.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site_colors = ColorMap::new(&dataset.sites);
        self.booster_colors = ColorMap::new(&dataset.booster_categories);
        self.site = SiteSelector::All;
        self.payload_range = dataset.full_payload_range();
        self.dataset = dataset;
        self.visible_indices.clear();
        self.status_message = None;
        self.invalidate();
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn site(&self) -> &SiteSelector {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    /// Change the site selector. Both charts go stale on change.
    pub fn set_site(&mut self, site: SiteSelector) {
        if self.site != site {
            self.site = site;
            self.invalidate();
        }
    }

    /// Change the payload window. Both charts go stale on change.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.payload_range != range {
            self.payload_range = range;
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        self.pie = ChartRegion::Stale;
        self.scatter = ChartRegion::Stale;
    }

    /// Recompute every stale chart from the current inputs.
    ///
    /// Both builders take the same filtered subset; neither reads the
    /// other's output.
    pub fn refresh(&mut self) {
        if !self.pie.is_stale() && !self.scatter.is_stale() {
            return;
        }

        let records = &self.dataset.records;
        self.visible_indices = filtered_indices(records, &self.site, self.payload_range);
        let subset: Vec<&LaunchRecord> = self.visible_indices.iter().map(|&i| &records[i]).collect();
        log::debug!(
            "Recomputing charts for site={} payload={}: {} of {} launches",
            self.site,
            self.payload_range,
            subset.len(),
            self.dataset.len()
        );

        if self.pie.is_stale() {
            self.pie = ChartRegion::Rendered(build_pie(&subset, &self.site));
        }
        if self.scatter.is_stale() {
            self.scatter =
                ChartRegion::Rendered(build_scatter(&subset, &self.site, self.payload_range));
        }
    }

    /// Indices of launches passing the filters as of the last refresh.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    /// Slider bounds: `[0, 10000]`, widened to the next step when the data
    /// goes past it.
    pub fn slider_bounds(&self) -> (f64, f64) {
        let data_max = self.dataset.payload_bounds().map_or(0.0, |(_, hi)| hi);
        let max = if data_max > PAYLOAD_SLIDER_MAX {
            (data_max / PAYLOAD_SLIDER_STEP).ceil() * PAYLOAD_SLIDER_STEP
        } else {
            PAYLOAD_SLIDER_MAX
        };
        (PAYLOAD_SLIDER_MIN, max)
    }
}
