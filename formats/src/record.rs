//! Per-region partial record.
//!
//! A metric is either absent or a non-negative count.  Absent is not zero: a record only
//! carries the metrics someone touched.
//!

use std::collections::btree_map::Iter;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Metric;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct RegionRecord {
    #[serde(flatten)]
    metrics: BTreeMap<Metric, u64>,
    /// Last update of the source for this region
    #[serde(rename = "publishedDate", skip_serializing_if = "Option::is_none")]
    published_date: Option<DateTime<Utc>>,
}

impl RegionRecord {
    pub fn new() -> Self {
        RegionRecord::default()
    }

    /// Builder-style, mostly for tests and fixed buckets.
    ///
    pub fn with(mut self, metric: Metric, value: u64) -> Self {
        self.metrics.insert(metric, value);
        self
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> Option<u64> {
        self.metrics.get(&metric).copied()
    }

    #[inline]
    pub fn has(&self, metric: Metric) -> bool {
        self.metrics.contains_key(&metric)
    }

    /// Initialise `metric` to `delta` if absent, add `delta` otherwise.  Saturates at `u64::MAX`.
    ///
    #[inline]
    pub fn add(&mut self, metric: Metric, delta: u64) {
        let v = self.metrics.entry(metric).or_insert(0);
        *v = v.saturating_add(delta);
    }

    /// Make sure `metric` exists, with `0` if we create it.
    ///
    #[inline]
    pub fn ensure(&mut self, metric: Metric) {
        self.metrics.entry(metric).or_insert(0);
    }

    /// Add every metric of `other` into ours.  `published_date` is kept if already set.
    ///
    pub fn merge(&mut self, other: &RegionRecord) {
        other.iter().for_each(|(m, v)| self.add(*m, *v));
        if self.published_date.is_none() {
            self.published_date = other.published_date;
        }
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, Metric, u64> {
        self.metrics.iter()
    }

    /// No metric at all (does not look at `published_date`).
    ///
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    #[inline]
    pub fn published_date(&self) -> Option<DateTime<Utc>> {
        self.published_date
    }

    #[inline]
    pub fn set_published_date(&mut self, date: DateTime<Utc>) {
        self.published_date = Some(date);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_record_add_creates_then_sums() {
        let mut r = RegionRecord::new();
        assert!(r.is_empty());
        assert_eq!(None, r.get(Metric::Cases));

        r.add(Metric::Cases, 10);
        r.add(Metric::Cases, 2);
        assert_eq!(Some(12), r.get(Metric::Cases));
        assert!(!r.has(Metric::Deaths));
    }

    #[test]
    fn test_record_add_saturates() {
        let mut r = RegionRecord::new();
        r.add(Metric::Cases, u64::MAX);
        r.add(Metric::Cases, 1);
        assert_eq!(Some(u64::MAX), r.get(Metric::Cases));
    }

    #[test]
    fn test_record_ensure_does_not_overwrite() {
        let mut r = RegionRecord::new().with(Metric::Tested, 7);
        r.ensure(Metric::Tested);
        r.ensure(Metric::Positives);
        assert_eq!(Some(7), r.get(Metric::Tested));
        assert_eq!(Some(0), r.get(Metric::Positives));
    }

    #[test]
    fn test_record_merge() {
        let when = Utc.with_ymd_and_hms(2020, 4, 27, 18, 13, 20).unwrap();
        let mut a = RegionRecord::new().with(Metric::Cases, 1);
        let mut b = RegionRecord::new()
            .with(Metric::Cases, 2)
            .with(Metric::Deaths, 1);
        b.set_published_date(when);

        a.merge(&b);
        assert_eq!(Some(3), a.get(Metric::Cases));
        assert_eq!(Some(1), a.get(Metric::Deaths));
        assert_eq!(Some(when), a.published_date());
    }

    #[test]
    fn test_record_serialize() {
        let when = Utc.with_ymd_and_hms(2020, 4, 27, 18, 13, 20).unwrap();
        let mut r = RegionRecord::new().with(Metric::Deaths, 1).with(Metric::Cases, 3);
        let s = serde_json::to_string(&r).unwrap();
        assert_eq!(r#"{"cases":3,"deaths":1}"#, s);

        r.set_published_date(when);
        let s = serde_json::to_string(&r).unwrap();
        assert_eq!(
            r#"{"cases":3,"deaths":1,"publishedDate":"2020-04-27T18:13:20Z"}"#,
            s
        );
    }
}
