//! Turn an accumulator into the list handed over to the pipeline.
//!

use tracing::trace;

use casecount_formats::{add_empty_regions, rows_from, sum_data, OutputRow, RegionRecord, UNASSIGNED};

use crate::Accumulator;

/// Produce the final rows:
///
/// 1. accumulated regions, in name order
/// 2. the separately tracked unassigned bucket, merged if the accumulator already had one
/// 3. the total row
/// 4. an empty record for every region of `all` not already present
///
#[tracing::instrument(skip_all)]
pub fn finalize<S: AsRef<str>>(
    acc: Accumulator,
    all: &[S],
    unassigned: Option<RegionRecord>,
) -> Vec<OutputRow> {
    let mut rows = rows_from(acc.into_regions());

    if let Some(bucket) = unassigned {
        match rows.iter_mut().find(|row| row.is_unassigned()) {
            Some(row) => row.record.merge(&bucket),
            None => rows.push(OutputRow::region(UNASSIGNED, bucket)),
        }
    }

    let total = sum_data(&rows);
    rows.push(total);

    add_empty_regions(&mut rows, all);
    trace!("{} rows", rows.len());
    rows
}
