//! Module describing all possible commands and sub-commands to the `casectl` main driver
//!
//! We have these commands:
//!
//! - `fetch` runs a jurisdiction adapter and writes the resulting rows
//! - `list` shows the known jurisdictions or sources
//! - `init` installs the default `sources.hcl` in the configuration directory
//! - `completion` is here just to configure the various shells completion system.
//! - `version`
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser, ValueEnum};
use clap_complete::shells::Shell;

use casecount_formats::Container;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file (`sources.hcl`).
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Hierarchical tracing output.
    #[clap(short = 'T', long)]
    pub tree: bool,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `fetch [-d date] [-o FILE] [-F format] jurisdiction`
/// `init`
/// `list (jurisdictions|sources)`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Fetch data for the specified jurisdiction
    Fetch(FetchOpts),
    /// Install default configuration
    Init,
    /// List jurisdictions or sources
    List(ListOpts),
    /// List all package versions
    Version,
}

// ------

/// Options for fetching data as of a given day and an optional output file.
///
#[derive(Debug, Parser)]
pub struct FetchOpts {
    /// Reference date, today by default
    #[clap(short = 'd', long)]
    pub date: Option<String>,
    /// Output file, stdout by default
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Output format, from the file extension by default
    #[clap(short = 'F', long, value_parser = clap::builder::PossibleValuesParser::new(["csv", "json"]))]
    pub format: Option<String>,
    /// Jurisdiction name, e.g. `US-MO`
    pub jurisdiction: String,
}

impl FetchOpts {
    /// Explicit format first, then output file extension, CSV otherwise.
    ///
    pub fn container(&self) -> Container {
        match (&self.format, &self.output) {
            (Some(fmt), _) => Container::from_path(&format!(".{fmt}")),
            (None, Some(path)) => Container::from_path(&path.to_string_lossy()),
            (None, None) => Container::default(),
        }
    }
}

// ------

/// Options to generate completion files at runtime
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

// ------

/// All `list` sub-commands:
///
/// `list jurisdictions`
/// `list sources`
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(value_parser)]
    pub cmd: ListSubCommand,
}

/// These are the sub-commands for `list`
///
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, ValueEnum)]
pub enum ListSubCommand {
    /// List all jurisdiction adapters
    Jurisdictions,
    /// List all sources from `sources.hcl`
    Sources,
}
