//! Cumulative testing counts.
//!
//! Some jurisdictions publish tests separately from cases and deaths, as a feature layer we can
//! run grouped statistics against.  Every group's count is added to `tested` of its region.
//!

use tracing::{debug, info};

use casecount_common::RunDate;
use casecount_formats::{Metric, UNASSIGNED};
use casecount_sources::{Fetcher, OutStatistic, StatsQuery};

use crate::{Accumulator, EngineError, Normalizer};

/// Where the testing data lives.
///
#[derive(Clone, Copy, Debug)]
pub struct TestingLayer {
    /// ArcGIS hosted services server number
    pub server: u8,
    pub org_id: &'static str,
    pub layer: &'static str,
    /// Date field filtered upon
    pub date_field: &'static str,
    /// Field holding the (uppercase) region name
    pub region_field: &'static str,
    /// Second grouping field
    pub result_field: &'static str,
}

/// Name of the computed count
const COUNT: &str = "Count";

impl TestingLayer {
    /// Query for every test up to and including `as_of`.
    ///
    pub fn query(&self, as_of: &RunDate) -> StatsQuery {
        StatsQuery::new(&format!("{} <= DATE '{}'", self.date_field, as_of.iso()))
            .group_by(&[self.region_field, self.result_field])
            .statistic(OutStatistic::count(COUNT))
    }
}

/// Fetch testing counts as of `as_of` and merge them into `acc`.
///
/// Every region seen gets `tested` and `positives` (zero if new) and its count added to
/// `tested`.  Groups with a null region go to `UNASSIGNED`.  Any other failure, including a
/// malformed feature, aborts the enrichment.
///
#[tracing::instrument(skip(fetcher, normalizer, acc))]
pub async fn enrich(
    fetcher: &dyn Fetcher,
    source: &TestingLayer,
    normalizer: &Normalizer,
    acc: &mut Accumulator,
    as_of: &RunDate,
) -> Result<(), EngineError> {
    let query = source.query(as_of);
    let fs = fetcher
        .query_statistics(source.server, source.org_id, source.layer, &query)
        .await?;
    info!("{} testing groups as of {as_of}", fs.features.len());

    for feature in &fs.features {
        debug!("feature={:?}", feature.attributes);

        let count = feature.count(COUNT).ok_or_else(|| {
            EngineError::BadFeature(format!("bad {COUNT} in {:?}", feature.attributes))
        })?;

        // A null group holds the tests with no region.
        let region = match feature.str(source.region_field) {
            Some(raw) => match normalizer.normalize_upper(raw) {
                Some(region) => region.to_string(),
                None => {
                    acc.unknown_name(raw);
                    UNASSIGNED.to_string()
                }
            },
            None if feature.is_null(source.region_field) => UNASSIGNED.to_string(),
            None => {
                return Err(EngineError::BadFeature(format!(
                    "bad {} in {:?}",
                    source.region_field, feature.attributes
                )))
            }
        };

        acc.ensure(&region, &[Metric::Tested, Metric::Positives]);
        acc.add_metric(&region, Metric::Tested, count);
    }
    Ok(())
}
