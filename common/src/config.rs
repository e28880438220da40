//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for the various configuration files of
//! `casecount`.  This is a configuration file/struct neutral loading engine, storing only the
//! base directory and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::makepath;

/// Main name for the directory base
pub const TAG: &str = "casecount";

/// Every configuration file carries a `version` field.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Bad config file version v{0}, need v{1}")]
    BadVersion(usize, usize),
    #[error("Unknown config file {0:?}")]
    NotFound(PathBuf),
    #[error("No home directory, can not find config files")]
    NoHome,
}

/// Configuration file wrapper, remembers where it was loaded from.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + Versioned> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    /// Which file was loaded, `None` for the embedded default.
    source: Option<PathBuf>,
    inner: T,
}

/// Returns the default configuration directory, `$HOME/.config/casecount` on UNIX.
///
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base = BaseDirs::new().ok_or(ConfigError::NoHome)?;

    #[cfg(unix)]
    let dir = makepath!(base.home_dir(), ".config", TAG);

    #[cfg(windows)]
    let dir = makepath!(base.data_local_dir(), TAG);

    debug!("config dir = {dir:?}");
    Ok(dir)
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + Versioned,
{
    /// Parse HCL data and check its version.
    ///
    pub fn parse(data: &str, want: usize) -> Result<T> {
        let inner: T = hcl::from_str(data)?;
        debug!("struct data = {inner:?}");

        if inner.version() != want {
            return Err(ConfigError::BadVersion(inner.version(), want).into());
        }
        Ok(inner)
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI (must exist)
    /// - `fname` inside the default config directory
    /// - `default`, the embedded copy of the file
    ///
    #[tracing::instrument(skip(default))]
    pub fn load(explicit: Option<&Path>, fname: &str, want: usize, default: &str) -> Result<Self> {
        let basedir = match explicit {
            Some(path) => path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
            None => config_dir()?,
        };

        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()).into());
                }
                Some(path.to_path_buf())
            }
            None => {
                let path = basedir.join(fname);
                if path.exists() {
                    Some(path)
                } else {
                    trace!("no {path:?}, using built-in defaults");
                    None
                }
            }
        };

        let inner = match &path {
            Some(path) => {
                trace!("Loading config file {path:?}");
                let data = fs::read_to_string(path)?;
                Self::parse(&data, want)?
            }
            None => Self::parse(default, want)?,
        };

        Ok(ConfigFile {
            basedir,
            source: path,
            inner,
        })
    }

    /// Returns the path of the config directory
    ///
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Which file did we load, if any
    ///
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Return the inner configuration
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consume and return the inner configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Foo {
        version: usize,
        name: String,
    }

    impl Versioned for Foo {
        fn version(&self) -> usize {
            self.version
        }
    }

    const FOO: &str = r##"
version = 1
name = "embedded"
"##;

    #[test]
    fn test_config_parse_good() -> Result<()> {
        let foo = ConfigFile::<Foo>::parse(FOO, 1)?;
        assert_eq!("embedded", foo.name);
        Ok(())
    }

    #[test]
    fn test_config_parse_bad_version() {
        let foo = ConfigFile::<Foo>::parse(FOO, 2);
        assert!(foo.is_err());
    }

    #[test]
    fn test_config_load_explicit_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let fname = dir.path().join("foo.hcl");
        let mut fh = fs::File::create(&fname)?;
        writeln!(fh, "version = 1\nname = \"on-disk\"")?;

        let cfg = ConfigFile::<Foo>::load(Some(fname.as_path()), "foo.hcl", 1, FOO)?;
        assert_eq!("on-disk", cfg.inner().name);
        assert_eq!(Some(fname.as_path()), cfg.source());
        assert_eq!(dir.path(), cfg.config_path());
        Ok(())
    }

    #[test]
    fn test_config_load_missing_explicit_file() {
        let cfg = ConfigFile::<Foo>::load(Some(Path::new("/nonexistent/foo.hcl")), "foo.hcl", 1, FOO);
        assert!(cfg.is_err());
    }
}
