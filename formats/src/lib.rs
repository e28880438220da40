//! Definition of the data formats
//!
//! Every jurisdiction adapter produces the same thing in the end: a list of per-region records,
//! each carrying some of the known metrics.  This crate defines these records, the reducers used
//! to finalise a list (totals, missing regions) and the containers we can write them into.
//!

// Re-export for convenience
//
pub use container::*;
pub use metric::*;
pub use record::*;
pub use row::*;
pub use transform::*;

mod container;
mod metric;
mod record;
mod row;
mod transform;

/// Name of the synthetic region holding data not attributable to any canonical region.
///
pub const UNASSIGNED: &str = "(unassigned)";

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
