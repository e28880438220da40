//! Define what we consider a "container", that is, a file format for the final rows.
//!
//! This is different from a "data" format (the shape of a record) which is why it is separate.
//!

use std::io::Write;

use eyre::Result;
use serde::{Deserialize, Serialize};
use strum::{EnumString, VariantNames};
use tracing::trace;

use crate::{Metric, OutputRow};

/// Supported output containers.
///
/// ```rust
/// use casecount_formats::Container;
///
/// assert_eq!(Container::Json, Container::from_path("out/mo.JSON"));
/// assert_eq!(Container::Csv, "csv".parse().unwrap());
/// ```
///
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    EnumString,
    VariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Container {
    /// Flat CSV with one column per metric
    #[default]
    Csv,
    /// JSON array, absent metrics are omitted
    Json,
}

/// Flattened row for CSV where every metric is a column, empty when absent.
///
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    county: &'a str,
    cases: Option<u64>,
    deaths: Option<u64>,
    tested: Option<u64>,
    positives: Option<u64>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
}

impl<'a> From<&'a OutputRow> for CsvRow<'a> {
    fn from(row: &'a OutputRow) -> Self {
        CsvRow {
            county: row.name().unwrap_or_default(),
            cases: row.get(Metric::Cases),
            deaths: row.get(Metric::Deaths),
            tested: row.get(Metric::Tested),
            positives: row.get(Metric::Positives),
            published_date: row.record.published_date().map(|d| d.to_rfc3339()),
        }
    }
}

impl Container {
    /// Deduce from a file name, CSV unless it ends in `.json`
    ///
    pub fn from_path(path: &str) -> Self {
        let extension = path.rsplit('.').next().unwrap_or_default().to_lowercase();
        match extension.as_str() {
            "json" => Container::Json,
            _ => Container::Csv,
        }
    }

    /// Serialise `rows` into `out`.
    ///
    #[tracing::instrument(skip(rows, out))]
    pub fn write<W: Write>(&self, rows: &[OutputRow], out: W) -> Result<()> {
        trace!("writing {} rows", rows.len());
        match self {
            Container::Csv => {
                let mut wtr = csv::Writer::from_writer(out);
                for row in rows {
                    wtr.serialize(CsvRow::from(row))?;
                }
                wtr.flush()?;
            }
            Container::Json => {
                let mut out = out;
                serde_json::to_writer_pretty(&mut out, rows)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
