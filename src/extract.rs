//! Anchor extraction from HTML pages and link classification.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::path::Path;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

/// `scheme:` prefix per RFC 3986 (`http:`, `mailto:`, `javascript:` ...).
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// The `href` of every `<a>` in document order. Anchors without one yield `None`.
pub fn extract_links_from_html(html: &str) -> Vec<Option<String>> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .map(|a| a.value().attr("href").map(str::to_string))
        .collect()
}

/// Read a page from disk and extract its links.
///
/// Invalid UTF-8 is replaced rather than rejected; only a failure to read the
/// file is an error.
pub fn extract_links(page: &Path) -> std::io::Result<Vec<Option<String>>> {
    let bytes = std::fs::read(page)?;
    Ok(extract_links_from_html(&String::from_utf8_lossy(&bytes)))
}

/// What kind of target a raw link points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// The anchor had no `href`.
    Missing,
    /// `#section` on the same page.
    Fragment,
    /// Has a scheme or is protocol-relative (`//host/...`).
    External,
    /// A file on the site. Holds the path part with any `?query` or
    /// `#fragment` removed.
    Local(&'a str),
}

pub fn classify(link: Option<&str>) -> LinkKind<'_> {
    let Some(link) = link else {
        return LinkKind::Missing;
    };
    if link.starts_with('#') {
        return LinkKind::Fragment;
    }
    if link.starts_with("//") || SCHEME_RE.is_match(link) {
        return LinkKind::External;
    }
    let end = link.find(['?', '#']).unwrap_or(link.len());
    LinkKind::Local(&link[..end])
}
