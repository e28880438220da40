//! This is the module handling the `fetch` sub-command.
//!

use std::fs::File;
use std::io::{self, BufWriter, Write};

use eyre::Result;
use tracing::{info, trace};

use casecount_common::RunDate;
use casecount_engine::Engine;

use crate::FetchOpts;

/// Run the adapter and write the rows where asked.
///
#[tracing::instrument(skip(engine))]
pub async fn fetch_jurisdiction(engine: &Engine, fopts: &FetchOpts) -> Result<()> {
    trace!("fetch_jurisdiction({:?})", fopts.jurisdiction);

    let run = RunDate::or_today(fopts.date.as_deref())?;
    if !run.is_explicit() {
        info!("No date given, fetching as of {run}");
    }
    let rows = engine.run(&fopts.jurisdiction, &run).await?;

    // Deduce format from file name or option, CSV by default.
    //
    let container = fopts.container();

    let out: Box<dyn Write> = match &fopts.output {
        Some(fname) => {
            info!("Writing {} rows into {fname:?} as {container}", rows.len());
            Box::new(BufWriter::new(File::create(fname)?))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };
    container.write(&rows, out)?;
    Ok(())
}
