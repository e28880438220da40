//! Common logging initializer
//!

use eyre::Result;
use tracing::trace;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Install the global subscriber.
///
/// Filters are read from `RUST_LOG`, `verbose` raises the default level when it is not set.
/// With `use_tree` we get the hierarchical span output instead of the compact one.
///
pub fn init_logging(name: &'static str, use_tree: bool, verbose: u8) -> Result<()> {
    // Load filters from environment, fall back on verbosity
    //
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(level)
        }
    };

    // Do we want hierarchical output?
    //
    let tree = if use_tree {
        Some(
            HierarchicalLayer::new(2)
                .with_ansi(true)
                .with_span_retrace(true)
                .with_span_modes(true)
                .with_targets(true)
                .with_verbose_entry(true)
                .with_verbose_exit(true)
                .with_bracketed_fields(true),
        )
    } else {
        None
    };

    let compact = if use_tree {
        None
    } else {
        Some(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
    };

    // Combine filters & exporters
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(compact)
        .try_init()?;

    trace!("Logging initialised for {name}.");
    Ok(())
}
