//! Core types for site scanning.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A `/`-delimited path relative to the scan root, held as segments.
///
/// Segments are kept verbatim: `..` and `.` are not normalized away, since the
/// resolver counts ascent segments itself. The string form only exists at the
/// boundaries (printing and filesystem calls).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SitePath {
    segments: Vec<String>,
}

impl SitePath {
    /// The empty path, i.e. the scan root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a `/`-delimited string into segments. The empty string is the root.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return Self::root();
        }
        Self {
            segments: s.split('/').map(str::to_string).collect(),
        }
    }

    pub fn from_segments(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// This path with `name` appended as a final segment.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Everything but the last segment.
    pub fn dir(&self) -> Self {
        let end = self.segments.len().saturating_sub(1);
        self.prefix(end)
    }

    /// The last segment, or `""` for the root.
    pub fn basename(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// The first `n` segments (all of them if `n` exceeds the length).
    pub fn prefix(&self, n: usize) -> Self {
        let n = n.min(self.segments.len());
        Self {
            segments: self.segments[..n].to_vec(),
        }
    }

    /// Drop the first `n` segments.
    pub fn skip(&self, n: usize) -> Self {
        Self {
            segments: self.segments.iter().skip(n).cloned().collect(),
        }
    }

    pub fn join(&self, other: &SitePath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Map onto the filesystem beneath `root`.
    ///
    /// Empty segments (from a leading `/` or doubled slashes) are skipped, so
    /// the result never escapes to the filesystem root.
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for segment in self.segments.iter().filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for SitePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// What a traversal entry stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    /// A directory that was empty or sat at the depth limit. Its contents were
    /// not enumerated; only its existence is recorded.
    Directory,
}

/// One entry produced by the tree walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: SitePath,
    pub kind: EntryKind,
}

impl WalkEntry {
    pub fn file(path: SitePath) -> Self {
        Self {
            path,
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: SitePath) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Prefix this entry with a parent directory name.
    pub fn under(self, dir: &str) -> Self {
        Self {
            path: SitePath::root().child(dir).join(&self.path),
            kind: self.kind,
        }
    }
}

impl fmt::Display for WalkEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::File => write!(f, "{}", self.path),
            EntryKind::Directory => write!(f, "{}/", self.path),
        }
    }
}

/// How the number of `..` ascents in a link is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AscentMode {
    /// Count every occurrence of the substring `..` anywhere in the link.
    /// A name such as `notes..txt` is counted as an ascent.
    #[default]
    Substring,
    /// Count only the leading segments that are exactly `..`.
    Segments,
}

/// Broken links per page, in link order, duplicates kept.
///
/// Every scanned page has an entry; pages without broken links map to an
/// empty list.
pub type ScanResult = BTreeMap<SitePath, Vec<String>>;

/// Names skipped during traversal unless the caller supplies its own list.
pub const DEFAULT_EXCLUDE: &[&str] = &[".git", ".gitignore", "node_modules"];

/// Substring a file name must contain to be scanned as a page.
pub const DEFAULT_PAGE_MARKER: &str = ".html";

/// Configuration for a site scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory the site lives in. All link resolution is relative to it.
    pub root: PathBuf,

    /// Remaining directory levels the walker may descend. Zero scans nothing.
    pub depth: usize,

    /// Child names skipped during traversal. Each entry matches exactly or as
    /// a glob pattern (`*.bak`).
    pub exclude: Vec<String>,

    /// Substring a file name must contain to count as a page.
    pub page_marker: String,

    pub ascent: AscentMode,

    /// Leave external, protocol-relative and fragment-only links unresolved,
    /// and drop `?query`/`#fragment` suffixes from local links before
    /// resolving them.
    pub skip_non_local: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            depth: 1,
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            page_marker: DEFAULT_PAGE_MARKER.to_string(),
            ascent: AscentMode::Substring,
            skip_non_local: true,
        }
    }
}

impl ScanConfig {
    /// Resolve every present link literally, whatever it looks like, so
    /// external and fragment-only links are reported as broken.
    pub fn legacy() -> Self {
        Self {
            skip_non_local: false,
            ..Self::default()
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Add names to the exclusion list.
    pub fn with_exclude(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_ascent(mut self, ascent: AscentMode) -> Self {
        self.ascent = ascent;
        self
    }
}
