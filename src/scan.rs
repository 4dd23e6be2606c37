//! The scan itself: walk the site, extract links per page, collect the broken ones.

use crate::discovery::{find_pages, traverse};
use crate::error::ScanError;
use crate::extract::{LinkKind, classify, extract_links};
use crate::resolve::Resolver;
use crate::types::{ScanConfig, ScanResult};
use std::io::{self, Write};
use tracing::{debug, info};

/// Outcome of a scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub broken: ScanResult,
    pub links_checked: usize,
    /// Links left unresolved: missing `href`, external, or fragment-only.
    pub links_skipped: usize,
}

impl ScanReport {
    pub fn is_ok(&self) -> bool {
        self.broken_count() == 0
    }

    pub fn pages(&self) -> usize {
        self.broken.len()
    }

    pub fn broken_count(&self) -> usize {
        self.broken.values().map(Vec::len).sum()
    }

    /// Pages with at least one broken link.
    pub fn pages_with_broken(&self) -> usize {
        self.broken.values().filter(|links| !links.is_empty()).count()
    }
}

/// Scan the site described by `config`.
///
/// Pages are visited one at a time and each link is checked once, against the
/// filesystem under `config.root`. The first unreadable directory or page
/// aborts the scan.
pub fn scan(config: &ScanConfig) -> Result<ScanReport, ScanError> {
    info!(root = %config.root.display(), depth = config.depth, "scanning site");

    let entries = traverse(&config.root, config.depth, &config.exclude)?;
    let pages = find_pages(&entries, &config.page_marker);
    debug!(entries = entries.len(), pages = pages.len(), "walk finished");

    let resolver = Resolver::new(&config.root, config.ascent);
    let mut report = ScanReport::default();

    for page in pages {
        let links = extract_links(&page.to_fs_path(&config.root)).map_err(|source| {
            ScanError::UnreadablePage {
                page: page.to_string(),
                source,
            }
        })?;
        debug!(%page, links = links.len(), "checking page");

        let mut broken = Vec::new();
        for link in &links {
            let target = match classify(link.as_deref()) {
                LinkKind::Missing => None,
                LinkKind::Local(path) if config.skip_non_local => Some(path),
                _ if config.skip_non_local => None,
                _ => link.as_deref(),
            };
            let Some(target) = target else {
                report.links_skipped += 1;
                continue;
            };

            report.links_checked += 1;
            if resolver.is_broken(&page, target) {
                broken.extend(link.clone());
            }
        }

        report.broken.insert(page, broken);
    }

    info!(
        pages = report.pages(),
        checked = report.links_checked,
        skipped = report.links_skipped,
        broken = report.broken_count(),
        "scan finished"
    );
    Ok(report)
}

/// Write the human-readable report: every page with broken links, then a summary.
pub fn render_report(report: &ScanReport, out: &mut impl Write) -> io::Result<()> {
    for (page, links) in &report.broken {
        if links.is_empty() {
            continue;
        }
        writeln!(out, "{}", page)?;
        for link in links {
            writeln!(out, "  \u{2717} {}", link)?;
        }
    }

    let mark = if report.is_ok() { "\u{2713}" } else { "\u{2717}" };
    writeln!(
        out,
        "\n{} broken link(s) across {} of {} page(s) {}",
        report.broken_count(),
        report.pages_with_broken(),
        report.pages(),
        mark
    )
}
