//! Output rows, what an adapter hands over to the rest of the pipeline.
//!

use serde::Serialize;

use crate::{Metric, RegionRecord, UNASSIGNED};

/// One region (or the state-level total when `region` is `None`) with its record.
///
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "county", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(flatten)]
    pub record: RegionRecord,
}

impl OutputRow {
    pub fn region(name: &str, record: RegionRecord) -> Self {
        OutputRow {
            region: Some(name.to_string()),
            record,
        }
    }

    /// Synthetic state-level row.
    ///
    pub fn total(record: RegionRecord) -> Self {
        OutputRow {
            region: None,
            record,
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.region.as_deref()
    }

    #[inline]
    pub fn is_total(&self) -> bool {
        self.region.is_none()
    }

    #[inline]
    pub fn is_unassigned(&self) -> bool {
        self.region.as_deref() == Some(UNASSIGNED)
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> Option<u64> {
        self.record.get(metric)
    }
}
