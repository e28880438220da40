//! Missouri, county-level.
//!
//! The Department of Health and Senior Services first published an HTML page with one table
//! (cases in-state and from other sources), then a second table for deaths and finally moved
//! to an ArcGIS dashboard whose layer is exported as CSV.  Testing counts always come from a
//! separate ArcGIS feature layer.
//!

use async_trait::async_trait;
use tracing::{info, trace, warn};

use casecount_common::RunDate;
use casecount_formats::{Metric, OutputRow, RegionRecord};
use casecount_sources::{
    number_or_zero, parse_string, parse_timestamp, Fetcher, Page, SourceError, Sources, Table,
};

use crate::{
    enrich, finalize, Accumulator, EngineError, Maintainer, Metadata, Normalizer, Scraper,
    TestingLayer, VariantKey, VariantTable,
};

/// Registry name
pub const US_MO: &str = "US-MO";

/// Entry in `sources.hcl`
const SITE: &str = "us-mo";
const ROUTE: &str = "results";

const SUFFIX: &str = " County";

/// Deaths got their own table on the page after that day.
const DEATHS_TABLE_AFTER: &str = "2020-03-24";

/// ArcGIS dashboard and layer of the CSV export
const ARCGIS_SERVER: u8 = 6;
const DASHBOARD: &str = "6f2a47a25872470a815bcd95f52c2872";
const DASHBOARD_LAYER: &str = "lpha_boundry";

/// CSV rows attributed to nobody
const OUT_OF_STATE: &[&str] = &["TBD", "Out of State"];

const TESTING: TestingLayer = TestingLayer {
    server: ARCGIS_SERVER,
    org_id: "Bd4MACzvEukoZ9mR",
    layer: "Daily_COVID19_Testing_Report_for_OPI",
    date_field: "test_date",
    region_field: "county",
    result_field: "result",
};

pub const ALIASES: &[(&str, &str)] = &[
    ("Kansas City", "Jackson County"),
    ("St Louis", "St. Louis County"),
    ("St Charles", "St. Charles County"),
    ("St Clair", "St. Clair County"),
    ("Ste Genevieve", "Ste. Genevieve County"),
    ("St Francois", "St. Francois County"),
    ("Joplin", "Jasper County"),
    ("St Louis City", "St. Louis City"),
];

pub const COUNTIES: &[&str] = &[
    "Adair County",
    "Andrew County",
    "Atchison County",
    "Audrain County",
    "Barry County",
    "Barton County",
    "Bates County",
    "Benton County",
    "Bollinger County",
    "Boone County",
    "Buchanan County",
    "Butler County",
    "Caldwell County",
    "Callaway County",
    "Camden County",
    "Cape Girardeau County",
    "Carroll County",
    "Carter County",
    "Cass County",
    "Cedar County",
    "Chariton County",
    "Christian County",
    "Clark County",
    "Clay County",
    "Clinton County",
    "Cole County",
    "Cooper County",
    "Crawford County",
    "Dade County",
    "Dallas County",
    "Daviess County",
    "DeKalb County",
    "Dent County",
    "Douglas County",
    "Dunklin County",
    "Franklin County",
    "Gasconade County",
    "Gentry County",
    "Greene County",
    "Grundy County",
    "Harrison County",
    "Henry County",
    "Hickory County",
    "Holt County",
    "Howard County",
    "Howell County",
    "Iron County",
    "Jackson County",
    "Jasper County",
    "Jefferson County",
    "Johnson County",
    "Knox County",
    "Laclede County",
    "Lafayette County",
    "Lawrence County",
    "Lewis County",
    "Lincoln County",
    "Linn County",
    "Livingston County",
    "Macon County",
    "Madison County",
    "Maries County",
    "Marion County",
    "McDonald County",
    "Mercer County",
    "Miller County",
    "Mississippi County",
    "Moniteau County",
    "Monroe County",
    "Montgomery County",
    "Morgan County",
    "New Madrid County",
    "Newton County",
    "Nodaway County",
    "Oregon County",
    "Osage County",
    "Ozark County",
    "Pemiscot County",
    "Perry County",
    "Pettis County",
    "Phelps County",
    "Pike County",
    "Platte County",
    "Polk County",
    "Pulaski County",
    "Putnam County",
    "Ralls County",
    "Randolph County",
    "Ray County",
    "Reynolds County",
    "Ripley County",
    "St. Charles County",
    "St. Clair County",
    "St. Francois County",
    "St. Louis County",
    "St. Louis City",
    "Ste. Genevieve County",
    "Saline County",
    "Schuyler County",
    "Scotland County",
    "Scott County",
    "Shannon County",
    "Shelby County",
    "Stoddard County",
    "Stone County",
    "Sullivan County",
    "Taney County",
    "Texas County",
    "Vernon County",
    "Warren County",
    "Washington County",
    "Wayne County",
    "Webster County",
    "Worth County",
    "Wright County",
];

/// Extraction routines, by the day they start to apply.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MoVariant {
    /// One table, cases split between two columns
    Original,
    /// Cases table, then a deaths table
    SplitTables,
    /// CSV export of the ArcGIS dashboard
    Arcgis,
}

#[derive(Debug)]
pub struct Missouri {
    /// HTML page with the tables
    url: String,
    normalizer: Normalizer,
    variants: VariantTable<MoVariant>,
    meta: Metadata,
}

impl Missouri {
    #[tracing::instrument(skip(sources))]
    pub fn new(sources: &Sources) -> Result<Self, EngineError> {
        let url = sources.site(SITE)?.url(ROUTE)?;
        let variants = VariantTable::from_keys([
            ("0", MoVariant::Original),
            ("2020-02-22", MoVariant::SplitTables),
            ("2020-03-30", MoVariant::Arcgis),
        ])?;

        Ok(Missouri {
            url,
            normalizer: Normalizer::new(SUFFIX, COUNTIES, ALIASES),
            variants,
            meta: Metadata {
                state: "iso2:US-MO",
                country: "iso1:US",
                kind: "table",
                aggregate: "county",
                url: "https://health.mo.gov/living/healthcondiseases/communicable/novel-coronavirus/results.php",
                sources: vec!["Missouri Department of Health and Senior Services"],
                maintainers: vec![
                    Maintainer {
                        name: "Paul Boal",
                        github: Some("paulboal"),
                    },
                    Maintainer {
                        name: "David Cardon",
                        github: Some("davidcardonAH"),
                    },
                ],
            },
        })
    }

    /// `n`-th table of the page or fail.
    ///
    fn table<'a>(&self, page: &'a Page, n: usize) -> Result<&'a Table, EngineError> {
        let table = page.table(n).ok_or_else(|| {
            let found = page.tables().len();
            SourceError::Malformed(self.url.clone(), format!("no table #{n} in {found}"))
        })?;
        if table.is_empty() {
            warn!("table #{n} is empty");
        }
        Ok(table)
    }

    /// Single table: name, in-state cases, other cases.
    ///
    async fn original(&self, fetcher: &dyn Fetcher, acc: &mut Accumulator) -> Result<(), EngineError> {
        let page = fetcher.page(&self.url).await?;
        let table = self.table(&page, 0)?;

        for row in table.rows() {
            let name = self.normalizer.normalize(row.text(0));
            let cases = number_or_zero(row.text(1)).saturating_add(number_or_zero(row.text(2)));
            acc.record(&name, Metric::Cases, cases);
        }
        Ok(())
    }

    /// Cases table, then deaths table once it exists.  Regions created from the cases table
    /// start with no deaths.
    ///
    async fn split_tables(
        &self,
        fetcher: &dyn Fetcher,
        run: &RunDate,
        acc: &mut Accumulator,
    ) -> Result<(), EngineError> {
        let page = fetcher.page(&self.url).await?;

        for row in self.table(&page, 0)?.rows() {
            let name = self.normalizer.normalize(row.text(0));
            let Some(region) = acc.resolve(&name) else {
                continue;
            };
            let new = !acc.contains(&region);
            acc.add_metric(&region, Metric::Cases, number_or_zero(row.text(1)));
            if new {
                acc.ensure(&region, &[Metric::Deaths]);
            }
        }

        if run.is_after(DEATHS_TABLE_AFTER)? {
            for row in self.table(&page, 1)?.rows() {
                let name = self.normalizer.normalize(row.text(0));
                acc.record(&name, Metric::Deaths, number_or_zero(row.text(1)));
            }
        } else {
            trace!("no deaths table before {DEATHS_TABLE_AFTER}");
        }
        Ok(())
    }

    /// Dashboard CSV export.  Returns the out-of-state bucket.
    ///
    async fn arcgis(&self, fetcher: &dyn Fetcher, acc: &mut Accumulator) -> Result<RegionRecord, EngineError> {
        let url = fetcher
            .arcgis_csv_url(ARCGIS_SERVER, DASHBOARD, DASHBOARD_LAYER)
            .await?;
        let rows = fetcher.csv(&url).await?;

        let mut bucket = RegionRecord::new()
            .with(Metric::Cases, 0)
            .with(Metric::Deaths, 0);

        for row in &rows {
            let raw = parse_string(row.get("NAME"));
            let cases = number_or_zero(row.get("Cases"));
            let deaths = number_or_zero(row.get("Deaths"));

            if OUT_OF_STATE.contains(&raw.as_str()) {
                bucket.add(Metric::Cases, cases);
                bucket.add(Metric::Deaths, deaths);
                continue;
            }

            let name = self.normalizer.normalize(&raw);
            let Some(region) = acc.resolve(&name) else {
                continue;
            };
            let new = !acc.contains(&region);
            acc.add_metric(&region, Metric::Cases, cases);
            acc.add_metric(&region, Metric::Deaths, deaths);
            if new {
                if let Some(date) = parse_timestamp(row.get("EditDate")) {
                    acc.set_published(&region, date);
                }
            }
        }
        Ok(bucket)
    }
}

#[async_trait]
impl Scraper for Missouri {
    fn name(&self) -> &'static str {
        US_MO
    }

    fn metadata(&self) -> &Metadata {
        &self.meta
    }

    fn variants(&self) -> Vec<VariantKey> {
        self.variants.keys().copied().collect()
    }

    #[tracing::instrument(skip(self, fetcher))]
    async fn scrape(&self, fetcher: &dyn Fetcher, run: &RunDate) -> Result<Vec<OutputRow>, EngineError> {
        let (key, variant) = self.variants.select(run.date())?;
        info!("{US_MO}: variant {key} ({variant}) for {run}");

        let mut acc = Accumulator::new();
        let bucket = match variant {
            MoVariant::Original => {
                self.original(fetcher, &mut acc).await?;
                None
            }
            MoVariant::SplitTables => {
                self.split_tables(fetcher, run, &mut acc).await?;
                None
            }
            MoVariant::Arcgis => Some(self.arcgis(fetcher, &mut acc).await?),
        };

        enrich(fetcher, &TESTING, &self.normalizer, &mut acc, run).await?;
        Ok(finalize(acc, COUNTIES, bucket))
    }
}

#[cfg(test)]
mod tests {
    use casecount_formats::UNASSIGNED;
    use casecount_sources::{CsvRow, Feature, FeatureSet};

    use super::*;
    use crate::testing::FakeFetcher;

    const URL: &str =
        "https://health.mo.gov/living/healthcondiseases/communicable/novel-coronavirus/results.php";
    const CSV_URL: &str = "https://opendata.arcgis.com/datasets/abc_0.csv";

    fn missouri() -> Missouri {
        Missouri::new(&Sources::builtin().unwrap()).unwrap()
    }

    fn run(day: &str) -> RunDate {
        RunDate::parse(day).unwrap()
    }

    fn no_tests() -> FeatureSet {
        FeatureSet::default()
    }

    fn tests(county: &str, count: u64) -> FeatureSet {
        let mut f = Feature::default();
        f.attributes.insert("county".into(), county.into());
        f.attributes.insert("result".into(), "Positive".into());
        f.attributes.insert("Count".into(), count.into());
        FeatureSet {
            features: vec![f],
            error: None,
        }
    }

    fn row<'a>(rows: &'a [OutputRow], name: &str) -> &'a OutputRow {
        rows.iter().find(|r| r.name() == Some(name)).unwrap()
    }

    fn total(rows: &[OutputRow]) -> &OutputRow {
        rows.iter().find(|r| r.is_total()).unwrap()
    }

    const ORIGINAL: &str = r##"
<table>
  <tr><th>County</th><th>In-state</th><th>Other</th></tr>
  <tr><td>Kansas City</td><td>10</td><td>2</td></tr>
  <tr><td>Boone</td><td>5</td><td>0</td></tr>
  <tr><td></td><td>99</td><td></td></tr>
</table>
"##;

    #[test]
    fn test_missouri_tables() {
        assert_eq!(115, COUNTIES.len());
        assert!(COUNTIES.contains(&"St. Louis City"));

        let m = missouri();
        assert_eq!(US_MO, m.name());
        assert_eq!("iso2:US-MO", m.metadata().state);
        assert_eq!(3, m.variants().len());
    }

    #[tokio::test]
    async fn test_missouri_original() {
        let fetcher = FakeFetcher::default()
            .with_page(URL, ORIGINAL)
            .with_stats(no_tests());

        let rows = missouri().scrape(&fetcher, &run("2020-01-15")).await.unwrap();

        assert_eq!(Some(12), row(&rows, "Jackson County").get(Metric::Cases));
        assert_eq!(Some(5), row(&rows, "Boone County").get(Metric::Cases));
        assert_eq!(None, row(&rows, "Boone County").get(Metric::Deaths));
        assert_eq!(Some(17), total(&rows).get(Metric::Cases));
        // every county plus the total row, the empty row created nothing
        assert_eq!(COUNTIES.len() + 1, rows.len());
        assert_eq!(vec![URL.to_string()], fetcher.urls());
    }

    const SPLIT: &str = r##"
<table>
  <tr><th>County</th><th>Cases</th></tr>
  <tr><td>St Louis</td><td>1,204</td></tr>
  <tr><td>TBD</td><td>3</td></tr>
</table>
<table>
  <tr><th>County</th><th>Deaths</th></tr>
  <tr><td>St Louis</td><td>7</td></tr>
  <tr><td>Greene</td><td>1</td></tr>
</table>
"##;

    #[tokio::test]
    async fn test_missouri_split_tables_before_deaths() {
        let fetcher = FakeFetcher::default()
            .with_page(URL, SPLIT)
            .with_stats(no_tests());

        let rows = missouri().scrape(&fetcher, &run("2020-03-24")).await.unwrap();

        let stl = row(&rows, "St. Louis County");
        assert_eq!(Some(1204), stl.get(Metric::Cases));
        assert_eq!(Some(0), stl.get(Metric::Deaths));
        assert_eq!(Some(3), row(&rows, UNASSIGNED).get(Metric::Cases));
        assert!(row(&rows, "Greene County").record.is_empty());
    }

    #[tokio::test]
    async fn test_missouri_split_tables_with_deaths() {
        let fetcher = FakeFetcher::default()
            .with_page(URL, SPLIT)
            .with_stats(no_tests());

        let rows = missouri().scrape(&fetcher, &run("2020-03-25")).await.unwrap();

        assert_eq!(Some(7), row(&rows, "St. Louis County").get(Metric::Deaths));
        let greene = row(&rows, "Greene County");
        assert_eq!(Some(1), greene.get(Metric::Deaths));
        assert_eq!(None, greene.get(Metric::Cases));
        assert_eq!(Some(8), total(&rows).get(Metric::Deaths));
    }

    #[tokio::test]
    async fn test_missouri_split_tables_missing_deaths_table() {
        let html = "<table><tr><td>Boone</td><td>1</td></tr></table>";
        let fetcher = FakeFetcher::default()
            .with_page(URL, html)
            .with_stats(no_tests());

        let r = missouri().scrape(&fetcher, &run("2020-03-25")).await;
        assert!(matches!(r, Err(EngineError::Source(SourceError::Malformed(_, _)))));
    }

    fn csv() -> Vec<CsvRow> {
        vec![
            CsvRow::from([("NAME", "Boone"), ("Cases", "5"), ("Deaths", "0"), ("EditDate", "1588011200000")]),
            CsvRow::from([("NAME", "St Charles"), ("Cases", "40"), ("Deaths", "2"), ("EditDate", "2020-04-27T18:13:20.273Z")]),
            CsvRow::from([("NAME", "TBD"), ("Cases", "4"), ("Deaths", "1"), ("EditDate", "")]),
            CsvRow::from([("NAME", "Out of State"), ("Cases", "6"), ("Deaths", ""), ("EditDate", "")]),
            CsvRow::from([("NAME", "Boone"), ("Cases", "1"), ("Deaths", "1"), ("EditDate", "1")]),
        ]
    }

    #[tokio::test]
    async fn test_missouri_arcgis() {
        let fetcher = FakeFetcher::default()
            .with_csv(CSV_URL, csv())
            .with_stats(tests("BOONE", 100));

        let rows = missouri().scrape(&fetcher, &run("2020-04-28")).await.unwrap();

        let boone = row(&rows, "Boone County");
        assert_eq!(Some(6), boone.get(Metric::Cases));
        assert_eq!(Some(1), boone.get(Metric::Deaths));
        assert_eq!(Some(100), boone.get(Metric::Tested));
        assert_eq!(Some(0), boone.get(Metric::Positives));
        assert_eq!(
            "2020-04-27T18:13:20+00:00",
            boone.record.published_date().unwrap().to_rfc3339()
        );

        let stc = row(&rows, "St. Charles County");
        assert_eq!(Some(40), stc.get(Metric::Cases));
        assert!(stc.record.published_date().is_some());

        let un = row(&rows, UNASSIGNED);
        assert_eq!(Some(10), un.get(Metric::Cases));
        assert_eq!(Some(1), un.get(Metric::Deaths));

        let t = total(&rows);
        assert_eq!(Some(56), t.get(Metric::Cases));
        assert_eq!(Some(4), t.get(Metric::Deaths));
        assert_eq!(Some(100), t.get(Metric::Tested));

        // every county, the unassigned bucket and the total
        assert_eq!(COUNTIES.len() + 2, rows.len());
        assert_eq!(
            vec!["test_date <= DATE '2020-04-28'".to_string()],
            fetcher.queries()
        );
    }

    #[tokio::test]
    async fn test_missouri_arcgis_empty_bucket() {
        let fetcher = FakeFetcher::default()
            .with_csv(CSV_URL, vec![])
            .with_stats(no_tests());

        let rows = missouri().scrape(&fetcher, &run("2020-04-28")).await.unwrap();
        let un = row(&rows, UNASSIGNED);
        assert_eq!(Some(0), un.get(Metric::Cases));
        assert_eq!(Some(0), un.get(Metric::Deaths));
    }

    #[tokio::test]
    async fn test_missouri_enrich_failure() {
        let fetcher = FakeFetcher::default().with_page(URL, ORIGINAL);

        let r = missouri().scrape(&fetcher, &run("2020-01-15")).await;
        assert!(r.is_err());
    }
}
