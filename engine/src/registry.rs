//! The `Engine` holds the configured sources and every known jurisdiction adapter.
//!

use std::collections::BTreeMap;

use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace};

use casecount_common::RunDate;
use casecount_formats::OutputRow;
use casecount_sources::{Fetcher, HttpFetcher, Sources};

use crate::{builtin, EngineError, Scraper};

#[derive(Debug)]
pub struct Engine {
    sources: Sources,
    /// Adapters by uppercase name
    scrapers: BTreeMap<String, Box<dyn Scraper>>,
}

impl Engine {
    /// Engine with every built-in adapter.
    ///
    #[tracing::instrument(skip(sources))]
    pub fn new(sources: Sources) -> Result<Self, EngineError> {
        let mut engine = Engine {
            sources,
            scrapers: BTreeMap::new(),
        };
        for s in builtin(&engine.sources)? {
            engine.register(s);
        }
        Ok(engine)
    }

    /// Add or replace an adapter.
    ///
    pub fn register(&mut self, scraper: Box<dyn Scraper>) {
        trace!("register {}", scraper.name());
        self.scrapers.insert(scraper.name().to_uppercase(), scraper);
    }

    /// Find an adapter, case-insensitive.
    ///
    pub fn scraper(&self, name: &str) -> Result<&dyn Scraper, EngineError> {
        self.scrapers
            .get(&name.to_uppercase())
            .map(|s| s.as_ref())
            .ok_or_else(|| EngineError::UnknownJurisdiction(name.to_string()))
    }

    #[inline]
    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Run `name` for `run` over HTTP.
    ///
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, name: &str, run: &RunDate) -> Result<Vec<OutputRow>, EngineError> {
        let fetcher = HttpFetcher::new(&self.sources)?;
        self.run_with(&fetcher, name, run).await
    }

    /// Run `name` for `run` with the given fetcher.
    ///
    pub async fn run_with(
        &self,
        fetcher: &dyn Fetcher,
        name: &str,
        run: &RunDate,
    ) -> Result<Vec<OutputRow>, EngineError> {
        let scraper = self.scraper(name)?;
        info!("running {} as of {run}", scraper.name());
        let rows = scraper.scrape(fetcher, run).await?;
        info!("{} rows", rows.len());
        Ok(rows)
    }

    /// Table of every adapter.
    ///
    #[tracing::instrument(skip(self))]
    pub fn list_jurisdictions(&self) -> Result<String> {
        let header = vec!["Name", "State", "Aggregate", "Variants", "Source"];

        let mut builder = Builder::default();
        builder.push_record(header);

        self.scrapers.values().for_each(|s| {
            let meta = s.metadata();
            let variants = s
                .variants()
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(",");
            builder.push_record(vec![
                s.name().to_string(),
                meta.state.to_string(),
                meta.aggregate.to_string(),
                variants,
                meta.sources.join(", "),
            ]);
        });

        let table = builder.build().with(Style::modern()).to_string();
        Ok(format!("List all jurisdictions:\n{table}"))
    }
}
