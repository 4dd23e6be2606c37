//! Logging setup for the command line.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialize structured logging on stderr, leaving stdout to the report.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between info and debug
/// for this crate.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose {
        "warn,site_links=debug"
    } else {
        "warn,site_links=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
