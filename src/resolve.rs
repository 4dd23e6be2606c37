//! Link resolution: where a link on a page points, and whether it's there.

use crate::types::{AscentMode, SitePath};
use std::path::{Path, PathBuf};

/// Number of directory levels a link climbs.
///
/// [`AscentMode::Substring`] counts every `..` anywhere in the string, so
/// `notes..txt` climbs once. [`AscentMode::Segments`] counts only leading
/// `..` segments.
pub fn count_ascent(link: &str, mode: AscentMode) -> usize {
    match mode {
        AscentMode::Substring => link.matches("..").count(),
        AscentMode::Segments => link.split('/').take_while(|s| *s == "..").count(),
    }
}

/// Resolves links against a site root.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    mode: AscentMode,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>, mode: AscentMode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root-relative path that `link`, found on `page`, refers to.
    ///
    /// Without ascent the link is taken relative to the page's directory. With
    /// `n` ascents the first `n` link segments are dropped and the rest is
    /// joined onto the page's directory minus its last `n + 1` segments.
    /// Climbing past the top lands at the root. A link starting with `/` is
    /// site-absolute and resolves from the root, whatever page it is on.
    pub fn resolve(&self, page: &SitePath, link: &str) -> SitePath {
        if let Some(rest) = link.strip_prefix('/') {
            return self.resolve(&SitePath::root(), rest);
        }

        let parent = count_ascent(link, self.mode);
        let link = SitePath::parse(link);
        let dir = page.dir();

        if parent == 0 {
            return dir.join(&link);
        }

        let keep = dir.len().checked_sub(parent + 1).unwrap_or(0);
        dir.prefix(keep).join(&link.skip(parent))
    }

    pub fn exists(&self, path: &SitePath) -> bool {
        path.to_fs_path(&self.root).exists()
    }

    pub fn is_broken(&self, page: &SitePath, link: &str) -> bool {
        let target = self.resolve(page, link);
        let broken = !self.exists(&target);
        if broken {
            tracing::debug!(%page, link, %target, "broken link");
        }
        broken
    }

    /// The links on `page` whose targets are missing, as written on the page.
    /// Order and duplicates are kept.
    pub fn broken_links_on(&self, page: &SitePath, links: &[String]) -> Vec<String> {
        links
            .iter()
            .filter(|link| self.is_broken(page, link))
            .cloned()
            .collect()
    }
}
