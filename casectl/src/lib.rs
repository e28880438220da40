//! Library part of the `casectl` utility.
//!
//! Options parsing lives in `cli`, every sub-command with some work to do has its own module
//! in `cmds`.
//!

pub use cli::*;
pub use cmds::*;

mod cli;
mod cmds;
