//! Per-run map of canonical region to partial record.
//!
//! Contributions are additive so the order in which rows are seen does not change the final
//! counts.  Names that could not be resolved are kept under the unassigned sentinel and
//! remembered for reporting.
//!

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use tracing::{trace, warn};

use casecount_formats::{Metric, RegionRecord, UNASSIGNED};

use crate::Normalized;

#[derive(Clone, Debug, Default)]
pub struct Accumulator {
    regions: BTreeMap<String, RegionRecord>,
    unknown: BTreeSet<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator::default()
    }

    /// Add `delta` to `metric` of `region`, creating either if needed.
    ///
    pub fn add_metric(&mut self, region: &str, metric: Metric, delta: u64) {
        trace!("{region}: {metric} += {delta}");
        self.entry(region).add(metric, delta);
    }

    /// Make sure `region` exists and carries every metric of `metrics`, zero when created.
    ///
    pub fn ensure(&mut self, region: &str, metrics: &[Metric]) {
        let rec = self.entry(region);
        metrics.iter().for_each(|m| rec.ensure(*m));
    }

    /// Route a contribution according to how its name was resolved.  Returns the region used,
    /// if any.
    ///
    pub fn record(&mut self, name: &Normalized, metric: Metric, delta: u64) -> Option<String> {
        let region = self.resolve(name)?;
        self.add_metric(&region, metric, delta);
        Some(region)
    }

    /// Region that a resolved name contributes to.  Unknown names go to the unassigned bucket
    /// and are remembered, invalid ones go nowhere.
    ///
    pub fn resolve(&mut self, name: &Normalized) -> Option<String> {
        match name {
            Normalized::Region(region) => Some(region.clone()),
            Normalized::Unassigned => Some(UNASSIGNED.to_string()),
            Normalized::Unknown(raw) => {
                self.unknown_name(raw);
                Some(UNASSIGNED.to_string())
            }
            Normalized::Invalid => None,
        }
    }

    /// Remember a name we could not resolve.
    ///
    pub fn unknown_name(&mut self, raw: &str) {
        if self.unknown.insert(raw.to_string()) {
            warn!("unknown region {raw:?}, counted as {UNASSIGNED}");
        }
    }

    /// Set `publishedDate` of `region` unless already set.
    ///
    pub fn set_published(&mut self, region: &str, date: DateTime<Utc>) {
        let rec = self.entry(region);
        if rec.published_date().is_none() {
            rec.set_published_date(date);
        }
    }

    #[inline]
    pub fn contains(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    #[inline]
    pub fn get(&self, region: &str) -> Option<&RegionRecord> {
        self.regions.get(region)
    }

    /// Names seen but not resolved, sorted.
    ///
    pub fn unknown(&self) -> Vec<&str> {
        self.unknown.iter().map(String::as_str).collect()
    }

    pub fn into_regions(self) -> BTreeMap<String, RegionRecord> {
        self.regions
    }

    fn entry(&mut self, region: &str) -> &mut RegionRecord {
        self.regions.entry(region.to_string()).or_default()
    }
}
