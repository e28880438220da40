//! This library is there to share some common code amongst all casecount modules.
//!

mod config;
mod logging;
mod macros;
mod rundate;

use clap::{crate_name, crate_version};
pub use config::*;
pub use logging::*;
pub use rundate::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
