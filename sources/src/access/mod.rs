//! The raw I/O side: what a jurisdiction adapter can ask of the outside world.
//!
//! Adapters only see the `Fetcher` trait so they can be tested against canned data, the real
//! implementation being `HttpFetcher`.
//!

use std::collections::BTreeMap;
use std::fmt::Debug;

use async_trait::async_trait;
use tracing::trace;

pub use arcgis::*;
pub use http::*;
pub use page::*;

use crate::SourceError;

mod arcgis;
mod http;
mod page;

/// Everything an adapter may fetch.
///
#[async_trait]
pub trait Fetcher: Debug + Send + Sync {
    /// Fetch and parse an HTML page.
    async fn page(&self, url: &str) -> Result<Page, SourceError>;
    /// Fetch and decode a CSV file with a header line.
    async fn csv(&self, url: &str) -> Result<Vec<CsvRow>, SourceError>;
    /// Resolve the CSV export URL of an ArcGIS dashboard layer.
    async fn arcgis_csv_url(
        &self,
        server: u8,
        dashboard_id: &str,
        layer: &str,
    ) -> Result<String, SourceError>;
    /// Run a statistics query against an ArcGIS feature layer.
    async fn query_statistics(
        &self,
        server: u8,
        org_id: &str,
        layer: &str,
        query: &StatsQuery,
    ) -> Result<FeatureSet, SourceError>;
}

/// One CSV record, by column name.
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CsvRow(BTreeMap<String, String>);

impl CsvRow {
    /// Value of `column`, the empty string if there is no such column.
    ///
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(String::as_str).unwrap_or_default()
    }

    #[inline]
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for CsvRow {
    fn from(value: [(&str, &str); N]) -> Self {
        CsvRow(
            value
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Decode a CSV body, the first line being the header.  A leading BOM is ignored.
///
pub fn parse_csv(url: &str, body: &str) -> Result<Vec<CsvRow>, SourceError> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(body.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|e| SourceError::Malformed(url.to_string(), e.to_string()))?
        .clone();

    let rows = rdr
        .records()
        .map(|rec| {
            let rec = rec.map_err(|e| SourceError::Malformed(url.to_string(), e.to_string()))?;
            let row = headers
                .iter()
                .zip(rec.iter())
                .map(|(h, v)| (h.to_string(), v.to_string()))
                .collect();
            Ok(CsvRow(row))
        })
        .collect::<Result<Vec<_>, SourceError>>()?;

    trace!("{} csv rows from {url}", rows.len());
    Ok(rows)
}
