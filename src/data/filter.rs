use super::model::{LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Filter predicate: site AND payload range
// ---------------------------------------------------------------------------

/// Return indices of the launches that pass both the site and the payload
/// predicate, ascending, so the subset keeps the original order.
///
/// A launch passes when:
/// * `site` is [`SiteSelector::All`], or names the launch's site exactly
/// * `range.lo() <= payload_mass_kg <= range.hi()`
///
/// A site name that never appears in `records` simply matches nothing.
pub fn filtered_indices(records: &[LaunchRecord], site: &SiteSelector, range: PayloadRange) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(&rec.site) && range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}

/// The subset itself, for tests that feed it to the chart builders.
#[cfg(test)]
pub(crate) fn filter<'a>(
    records: &'a [LaunchRecord],
    site: &SiteSelector,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    filtered_indices(records, site, range)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}
