//! Canned `Fetcher` for tests.
//!

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use casecount_sources::{CsvRow, FeatureSet, Fetcher, Page, SourceError, StatsQuery};

#[derive(Debug, Default)]
pub(crate) struct FakeFetcher {
    pages: BTreeMap<String, Page>,
    csv: BTreeMap<String, Vec<CsvRow>>,
    csv_url: Option<String>,
    stats: Option<FeatureSet>,
    /// Every URL asked for, in order
    urls: Mutex<Vec<String>>,
    /// `where` of every statistics query
    queries: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        let page = Page::parse(html).unwrap();
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn with_csv(mut self, url: &str, rows: Vec<CsvRow>) -> Self {
        self.csv_url = Some(url.to_string());
        self.csv.insert(url.to_string(), rows);
        self
    }

    pub fn with_stats(mut self, fs: FeatureSet) -> Self {
        self.stats = Some(fs);
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn unavailable(url: &str) -> SourceError {
        SourceError::Unavailable(url.to_string(), "not in fake".to_string())
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn page(&self, url: &str) -> Result<Page, SourceError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| Self::unavailable(url))
    }

    async fn csv(&self, url: &str) -> Result<Vec<CsvRow>, SourceError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.csv.get(url).cloned().ok_or_else(|| Self::unavailable(url))
    }

    async fn arcgis_csv_url(
        &self,
        server: u8,
        dashboard_id: &str,
        layer: &str,
    ) -> Result<String, SourceError> {
        let url = format!("arcgis:{server}/{dashboard_id}/{layer}");
        self.urls.lock().unwrap().push(url.clone());
        self.csv_url.clone().ok_or_else(|| Self::unavailable(&url))
    }

    async fn query_statistics(
        &self,
        server: u8,
        org_id: &str,
        layer: &str,
        query: &StatsQuery,
    ) -> Result<FeatureSet, SourceError> {
        self.queries.lock().unwrap().push(query.filter.clone());
        self.stats
            .clone()
            .ok_or_else(|| Self::unavailable(&format!("stats:{server}/{org_id}/{layer}")))
    }
}
