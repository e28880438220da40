//! What every jurisdiction adapter implements.
//!

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Serialize;

use casecount_common::RunDate;
use casecount_formats::OutputRow;
use casecount_sources::Fetcher;

use crate::{EngineError, VariantKey};

#[derive(Clone, Debug, Serialize)]
pub struct Maintainer {
    pub name: &'static str,
    pub github: Option<&'static str>,
}

/// Descriptive data attached to an adapter.
///
#[derive(Clone, Debug, Serialize)]
pub struct Metadata {
    /// e.g. `iso2:US-MO`
    pub state: &'static str,
    /// e.g. `iso1:US`
    pub country: &'static str,
    /// Kind of source, `table`, `csv`...
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Level of the regions, `county`...
    pub aggregate: &'static str,
    /// Main page
    pub url: &'static str,
    pub sources: Vec<&'static str>,
    pub maintainers: Vec<Maintainer>,
}

#[async_trait]
pub trait Scraper: Debug + Send + Sync {
    /// Registry name, e.g. `US-MO`
    fn name(&self) -> &'static str;
    fn metadata(&self) -> &Metadata;
    /// Keys of the variants this adapter knows about
    fn variants(&self) -> Vec<VariantKey>;
    /// Run the variant active on `run` and return the final rows.
    async fn scrape(&self, fetcher: &dyn Fetcher, run: &RunDate) -> Result<Vec<OutputRow>, EngineError>;
}
