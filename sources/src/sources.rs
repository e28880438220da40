//! This is the exposed part of the `casecount-sources` configuration.
//!

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use eyre::Result;
use serde::Deserialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use casecount_common::{ConfigFile, Versioned};

use crate::{Site, SourceError, CONFIG};

/// Current `sources.hcl` version
pub const SVERSION: usize = 1;

/// Default HTTP timeout in seconds
const DEF_TIMEOUT: u64 = 30;

/// Built-in copy of `sources.hcl`
const DEFAULT_SOURCES: &str = include_str!("sources.hcl");

/// On-disk representation.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SourcesConfig {
    version: usize,
    timeout: Option<u64>,
    site: BTreeMap<String, Site>,
}

impl Versioned for SourcesConfig {
    fn version(&self) -> usize {
        self.version
    }
}

/// List of sites and global access parameters.
///
#[derive(Clone, Debug, Default)]
pub struct Sources {
    timeout: Duration,
    site: BTreeMap<String, Site>,
}

impl From<SourcesConfig> for Sources {
    fn from(value: SourcesConfig) -> Self {
        let site = value
            .site
            .into_iter()
            .map(|(n, s)| {
                let mut site = s;
                site.name = n.clone();
                (n, site)
            })
            .collect();
        Sources {
            timeout: Duration::from_secs(value.timeout.unwrap_or(DEF_TIMEOUT)),
            site,
        }
    }
}

impl Sources {
    /// Load `sources.hcl` from the given file, the config directory or the built-in copy.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Self> {
        let cfg = ConfigFile::<SourcesConfig>::load(fname, CONFIG, SVERSION, DEFAULT_SOURCES)?;
        trace!("sources loaded from {:?} (config in {:?})", cfg.source(), cfg.config_path());
        Ok(Sources::from(cfg.into_inner()))
    }

    /// Parse from a string, mostly for tests.
    ///
    pub fn from_hcl(data: &str) -> Result<Self> {
        let cfg = ConfigFile::<SourcesConfig>::parse(data, SVERSION)?;
        Ok(Sources::from(cfg))
    }

    /// Built-in defaults
    ///
    pub fn builtin() -> Result<Self> {
        Sources::from_hcl(DEFAULT_SOURCES)
    }

    /// Install default files
    ///
    #[tracing::instrument]
    pub fn install_defaults(dir: &Path) -> std::io::Result<()> {
        // Create config directory if needed
        //
        if !dir.exists() {
            fs::create_dir_all(dir)?
        }

        // Copy content of `sources.hcl`  into place.
        //
        let fname = dir.join(CONFIG);
        fs::write(fname, DEFAULT_SOURCES)
    }

    /// HTTP timeout for every request
    ///
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get a site or fail
    ///
    pub fn site(&self, name: &str) -> Result<&Site, SourceError> {
        self.site
            .get(name)
            .ok_or_else(|| SourceError::UnknownSite(name.to_string()))
    }

    /// List of currently known sources into a nicely formatted string.
    ///
    #[tracing::instrument(skip(self))]
    pub fn list(&self) -> Result<String> {
        let header = vec!["Name", "Type", "URL", "Routes"];

        let mut builder = Builder::default();
        builder.push_record(header);

        self.site.iter().for_each(|(n, s)| {
            let routes = s
                .list()
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<String>>()
                .join(",");
            builder.push_record(vec![
                n.to_string(),
                s.dtype.to_string(),
                s.base_url.clone(),
                routes,
            ]);
        });

        let table = builder.build().with(Style::rounded()).to_string();
        let table = format!("Listing all sources:\n{table}");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use crate::SiteType;

    use super::*;

    #[test]
    fn test_sources_builtin() -> Result<()> {
        let s = Sources::builtin()?;

        assert_eq!(Duration::from_secs(30), s.timeout());

        let mo = s.site("us-mo")?;
        assert_eq!("us-mo", mo.name);
        assert_eq!(SiteType::Html, mo.dtype);
        assert_eq!(
            "https://health.mo.gov/living/healthcondiseases/communicable/novel-coronavirus/results.php",
            mo.url("results")?
        );

        let arcgis = s.site("arcgis")?;
        assert_eq!(SiteType::Arcgis, arcgis.dtype);
        assert_eq!(vec!["datasets", "items"], arcgis.list());
        Ok(())
    }

    #[test]
    fn test_sources_unknown_site() -> Result<()> {
        let s = Sources::builtin()?;
        assert!(matches!(s.site("bar"), Err(SourceError::UnknownSite(_))));
        Ok(())
    }

    #[test]
    fn test_sources_bad_version() {
        let s = Sources::from_hcl("version = 42\nsite \"x\" {\n  type = \"csv\"\n  base_url = \"\"\n}\n");
        assert!(s.is_err());
    }

    #[test]
    fn test_sources_install_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let dir = dir.path().join("casecount");
        Sources::install_defaults(&dir)?;

        let s = Sources::load(Some(dir.join(CONFIG).as_path()))?;
        assert_eq!("us-mo", s.site("us-mo")?.name);
        assert!(s.site("arcgis").is_ok());
        Ok(())
    }

    #[test]
    fn test_sources_list() -> Result<()> {
        let s = Sources::builtin()?;
        let table = s.list()?;
        assert!(table.contains("us-mo"));
        assert!(table.contains("arcgis"));
        Ok(())
    }
}
