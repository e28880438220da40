//! Reducers used to finalise a list of rows.
//!
//! - `rows_from()` flattens a region map into rows, in map order
//! - `sum_data()` computes the synthetic total row
//! - `add_empty_regions()` makes sure every canonical region shows up
//!

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::{OutputRow, RegionRecord};

/// Turn a region map into a list of rows.  The map order is kept.
///
pub fn rows_from(regions: BTreeMap<String, RegionRecord>) -> Vec<OutputRow> {
    regions
        .into_iter()
        .map(|(name, record)| OutputRow {
            region: Some(name),
            record,
        })
        .collect()
}

/// Sum every metric over all rows.  A metric absent from a row counts as zero for that row,
/// metrics never seen on any row are absent from the result.  Total rows already in the list
/// are skipped.
///
pub fn sum_data(rows: &[OutputRow]) -> OutputRow {
    let total = rows
        .iter()
        .filter(|row| !row.is_total())
        .fold(RegionRecord::new(), |mut acc, row| {
            row.record.iter().for_each(|(m, v)| acc.add(*m, *v));
            acc
        });
    trace!("total={:?}", total);
    OutputRow::total(total)
}

/// Append an empty record for every region of `all` not already in `rows`, in `all` order.
///
pub fn add_empty_regions<S: AsRef<str>>(rows: &mut Vec<OutputRow>, all: &[S]) {
    let present: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.region.clone())
        .collect();

    let missing: Vec<_> = all
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !present.contains(*name))
        .map(|name| OutputRow::region(name, RegionRecord::new()))
        .collect();
    trace!("adding {} empty regions", missing.len());
    rows.extend(missing);
}
