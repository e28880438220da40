//! Jurisdiction adapters shipped with the engine.
//!

use casecount_sources::Sources;

use crate::{EngineError, Scraper};

pub use us_mo::*;

mod us_mo;

/// Every built-in adapter, configured from `sources`.
///
pub fn builtin(sources: &Sources) -> Result<Vec<Box<dyn Scraper>>, EngineError> {
    Ok(vec![Box::new(Missouri::new(sources)?)])
}
