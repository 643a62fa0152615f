use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// `Flight Number` column, 0 when the file does not carry it.
    pub flight_number: u32,
    pub site: String,
    pub payload_mass_kg: f64,
    /// Full booster version (e.g. `F9 v1.1  B1011`), empty when absent.
    pub booster_version: String,
    pub booster_category: String,
    /// `class` column: `true` = success (1), `false` = failure (0).
    pub outcome: bool,
}

impl LaunchRecord {
    /// The outcome flag as the 0/1 value stored in the `class` column.
    pub fn outcome_flag(&self) -> u32 {
        u32::from(self.outcome)
    }
}

// ---------------------------------------------------------------------------
// SiteSelector – "all sites" sentinel or a single site
// ---------------------------------------------------------------------------

/// Value of the site dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Sentinel label used for [`SiteSelector::All`].
    pub const ALL_LABEL: &'static str = "ALL";

    /// Whether a record launched from `site` passes this selector.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(selected) => selected == site,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => f.write_str(Self::ALL_LABEL),
            SiteSelector::Site(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// PayloadRange – closed interval over payload mass
// ---------------------------------------------------------------------------

/// Inclusive `[lo, hi]` payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PayloadRange {
    lo: f64,
    hi: f64,
}

impl PayloadRange {
    /// Build a range; bounds given in the wrong order are swapped.
    pub fn new(lo: f64, hi: f64) -> Self {
        if lo <= hi {
            PayloadRange { lo, hi }
        } else {
            PayloadRange { lo: hi, hi: lo }
        }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// `lo <= mass <= hi`.
    pub fn contains(&self, mass: f64) -> bool {
        self.lo <= mass && mass <= self.hi
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{} kg", self.lo, self.hi)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with indices computed once at load.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    /// All launches in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    pub sites: Vec<String>,
    /// Sorted set of distinct booster categories.
    pub booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for rec in &records {
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
        }
    }

    /// Global (min, max) payload mass, `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.records.iter().map(|r| r.payload_mass_kg).fold(None, |acc, m| match acc {
            None => Some((m, m)),
            Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
        })
    }

    /// The range covering every record; `[0, 0]` when empty.
    pub fn full_payload_range(&self) -> PayloadRange {
        let (lo, hi) = self.payload_bounds().unwrap_or((0.0, 0.0));
        PayloadRange::new(lo, hi)
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, payload: f64, category: &str, outcome: bool) -> LaunchRecord {
    LaunchRecord {
        flight_number: 0,
        site: site.to_string(),
        payload_mass_kg: payload,
        booster_version: String::new(),
        booster_category: category.to_string(),
        outcome,
    }
}
