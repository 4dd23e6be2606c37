//! Find links in a static HTML site whose targets don't exist.

mod discovery;
mod error;
mod extract;
pub mod logging;
mod resolve;
mod scan;
mod types;

pub use discovery::{find_pages, is_page, traverse};
pub use error::ScanError;
pub use extract::{LinkKind, classify, extract_links, extract_links_from_html};
pub use resolve::{Resolver, count_ascent};
pub use scan::{ScanReport, render_report, scan};
pub use types::{
    AscentMode, DEFAULT_EXCLUDE, DEFAULT_PAGE_MARKER, EntryKind, ScanConfig, ScanResult,
    SitePath, WalkEntry,
};

use anyhow::{Context, Result};

/// Scan the site and print the report to stdout.
///
/// Broken links are not an error here; the caller decides what they mean for
/// the exit status.
pub fn run(config: &ScanConfig) -> Result<ScanReport> {
    println!(
        "Scanning {} (depth {})...\n",
        config.root.display(),
        config.depth
    );

    let report = scan(config)
        .with_context(|| format!("scan of '{}' failed", config.root.display()))?;

    let stdout = std::io::stdout();
    render_report(&report, &mut stdout.lock()).context("failed to write report")?;

    Ok(report)
}
