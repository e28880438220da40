//! This is the module handling the `list` sub-command.
//!

use eyre::Result;
use tracing::info;

use casecount_engine::Engine;

use crate::ListSubCommand;

/// Return the requested listing as a table.
///
#[tracing::instrument(skip(engine))]
pub fn list_from(engine: &Engine, cmd: ListSubCommand) -> Result<String> {
    match cmd {
        ListSubCommand::Jurisdictions => {
            info!("Listing all jurisdictions:");
            engine.list_jurisdictions()
        }
        ListSubCommand::Sources => {
            info!("Listing all sources:");
            engine.sources().list()
        }
    }
}
