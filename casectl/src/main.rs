use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use casecount_common::{config_dir, init_logging};
use casecount_engine::Engine;
use casecount_sources::Sources;
use casectl::{fetch_jurisdiction, list_from, Opts, SubCommand};

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    init_logging(NAME, opts.tree, opts.verbose)?;

    // Banner
    //
    banner()?;

    let subcmd = &opts.subcmd;

    // These do not need any configuration.
    //
    match subcmd {
        SubCommand::Completion(copts) => {
            // NOTE: you can generate UNIX shells completion on Windows and vice-versa.
            //
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
            return Ok(());
        }
        SubCommand::Init => {
            let dir = match &opts.config {
                Some(fname) => fname.parent().map(|p| p.to_path_buf()).unwrap_or_default(),
                None => config_dir()?,
            };
            info!("Installing default sources.hcl in {dir:?}");
            Sources::install_defaults(&dir)?;
            return Ok(());
        }
        _ => (),
    }

    // Load sources, either the given file, the one in the config directory or the built-in one.
    //
    let sources = Sources::load(opts.config.as_deref())?;

    // Instantiate Engine
    //
    let engine = Engine::new(sources)?;

    handle_subcmd(&engine, subcmd).await
}

async fn handle_subcmd(engine: &Engine, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `fetch jurisdiction`
        //
        SubCommand::Fetch(fopts) => {
            trace!("fetch");

            fetch_jurisdiction(engine, fopts).await?;
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => {
            let str = list_from(engine, lopts.cmd)?;
            println!("{}", str);
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("Modules: ");
            eprintln!("\t{}", casecount_common::version());
            eprintln!("\t{}", casecount_formats::version());
            eprintln!("\t{}", casecount_sources::version());
            eprintln!("\t{}", casecount_engine::version());
        }

        // Handled before loading the configuration
        //
        SubCommand::Completion(_) | SubCommand::Init => (),
    }
    Ok(())
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
