//! Module to deal with the different kinds of sources we fetch data from.
//!
//! The different submodules deal with the differences between sources:
//!
//! - configuration of sites and their routes (`sources.hcl`)
//! - fetching data (HTML pages, CSV exports, ArcGIS statistics queries)
//! - lenient parsing of the cells and fields we get back
//!

// Re-export these modules for a shorter import path.
//
pub use access::*;
pub use error::*;
pub use parse::*;
pub use route::*;
pub use site::*;
pub use sources::*;

mod access;
mod error;
mod parse;
mod route;
mod site;
mod sources;

#[macro_use]
mod macros;

/// Default configuration filename
const CONFIG: &str = "sources.hcl";

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
