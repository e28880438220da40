//! Library implementing the jurisdiction-independent part of scraping:
//!
//! - selection of the dated variant active on the run date,
//! - normalisation of region names,
//! - accumulation of partial records,
//! - enrichment with testing counts,
//! - finalisation of the output rows.
//!
//! Jurisdiction adapters implement `Scraper` on top of these and are registered in `Engine`.
//!

pub use accumulator::*;
pub use enrich::*;
pub use error::*;
pub use finalize::*;
pub use jurisdictions::*;
pub use normalize::*;
pub use registry::*;
pub use scraper::*;
pub use variant::*;

mod accumulator;
mod enrich;
mod error;
mod finalize;
mod jurisdictions;
mod normalize;
mod registry;
mod scraper;
mod variant;

#[cfg(test)]
mod testing;

const NAME: &str = env!("CARGO_PKG_NAME");
const EVERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> String {
    format!("{}/{}", NAME, EVERSION)
}
