//! Page discovery: depth-limited tree walk and the page filter.

use crate::error::ScanError;
use crate::types::{SitePath, WalkEntry};
use std::path::Path;

/// Names to skip while walking. Each entry matches a child name exactly or as
/// a glob pattern.
struct ExcludeSet {
    names: Vec<String>,
    patterns: Vec<glob::Pattern>,
}

impl ExcludeSet {
    fn new(exclude: &[String]) -> Self {
        let patterns = exclude
            .iter()
            .filter_map(|e| glob::Pattern::new(e).ok())
            .collect();
        Self {
            names: exclude.to_vec(),
            patterns,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name) || self.patterns.iter().any(|p| p.matches(name))
    }
}

/// List the entries under `root`, descending at most `depth` levels.
///
/// - Files contribute their root-relative path.
/// - A directory contributes its contents, or a single
///   [`EntryKind::Directory`](crate::EntryKind::Directory) entry when it is
///   empty or the depth limit stops the descent.
/// - Children named in `exclude` are neither listed nor descended into.
///
/// Order follows the filesystem's listing order. A `depth` of zero returns
/// nothing.
pub fn traverse(root: &Path, depth: usize, exclude: &[String]) -> Result<Vec<WalkEntry>, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingRoot {
            root: root.to_path_buf(),
        });
    }
    walk(root, depth, &ExcludeSet::new(exclude))
}

fn walk(dir: &Path, depth: usize, exclude: &ExcludeSet) -> Result<Vec<WalkEntry>, ScanError> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let read_err = |source: std::io::Error| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().to_string();
        if exclude.matches(&name) {
            tracing::trace!(name = %name, "excluded");
            continue;
        }

        let path = entry.path();
        if !path.is_dir() {
            entries.push(WalkEntry::file(SitePath::root().child(&name)));
            continue;
        }

        let children = walk(&path, depth - 1, exclude)?;
        if children.is_empty() {
            entries.push(WalkEntry::directory(SitePath::root().child(&name)));
        } else {
            entries.extend(children.into_iter().map(|c| c.under(&name)));
        }
    }

    Ok(entries)
}

/// Whether a walk entry is a page: a file whose name contains `marker`.
///
/// This is a substring test, so `about.htmlx` counts as a page for `.html`.
pub fn is_page(entry: &WalkEntry, marker: &str) -> bool {
    entry.is_file() && entry.path.basename().contains(marker)
}

/// Pick the pages out of a traversal, keeping traversal order.
pub fn find_pages(entries: &[WalkEntry], marker: &str) -> Vec<SitePath> {
    entries
        .iter()
        .filter(|e| is_page(e, marker))
        .map(|e| e.path.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_EXCLUDE;
    use std::fs;
    use tempfile::TempDir;

    fn default_exclude() -> Vec<String> {
        DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect()
    }

    fn names(entries: &[WalkEntry]) -> Vec<String> {
        let mut names: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        names.sort();
        names
    }

    fn site() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("index.html"), "<a href=\"about.html\">").unwrap();
        fs::write(root.join("about.html"), "").unwrap();
        fs::create_dir_all(root.join("blog/2020")).unwrap();
        fs::write(root.join("blog/post.html"), "").unwrap();
        fs::write(root.join("blog/2020/old.html"), "").unwrap();
        fs::create_dir_all(root.join("assets/empty")).unwrap();
        tmp
    }

    #[test]
    fn traverse_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = traverse(&tmp.path().join("nope"), 3, &[]).unwrap_err();
        assert!(matches!(err, ScanError::MissingRoot { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn traverse_depth_zero_is_empty() {
        let tmp = site();
        assert!(traverse(tmp.path(), 0, &[]).unwrap().is_empty());
    }

    #[test]
    fn traverse_depth_one_marks_directories() {
        let tmp = site();
        let entries = traverse(tmp.path(), 1, &[]).unwrap();
        assert_eq!(
            names(&entries),
            vec!["about.html", "assets/", "blog/", "index.html"]
        );
    }

    #[test]
    fn traverse_full_depth() {
        let tmp = site();
        let entries = traverse(tmp.path(), 10, &[]).unwrap();
        assert_eq!(
            names(&entries),
            vec![
                "about.html",
                "assets/empty/",
                "blog/2020/old.html",
                "blog/post.html",
                "index.html",
            ]
        );
    }

    #[test]
    fn traverse_depth_two_stops_at_nested_dir() {
        let tmp = site();
        let entries = traverse(tmp.path(), 2, &[]).unwrap();
        let names = names(&entries);
        assert!(names.contains(&"blog/2020/".to_string()));
        assert!(names.contains(&"blog/post.html".to_string()));
        assert!(!names.iter().any(|n| n.contains("old.html")));
    }

    #[test]
    fn traverse_files_listed_once() {
        let tmp = site();
        let entries = traverse(tmp.path(), 4, &[]).unwrap();
        let count = entries
            .iter()
            .filter(|e| e.to_string() == "index.html")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn traverse_skips_excluded_names() {
        let tmp = site();
        let root = tmp.path();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join(".gitignore"), "target").unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("node_modules/pkg/index.html"), "").unwrap();
        fs::create_dir_all(root.join("blog/node_modules")).unwrap();
        fs::write(root.join("blog/node_modules/x.html"), "").unwrap();

        let entries = traverse(root, 10, &default_exclude()).unwrap();
        for entry in &entries {
            for segment in entry.path.segments() {
                assert!(
                    !DEFAULT_EXCLUDE.contains(&segment.as_str()),
                    "excluded name leaked: {}",
                    entry
                );
            }
        }
        assert!(!entries.is_empty());
    }

    #[test]
    fn traverse_exclude_glob_pattern() {
        let tmp = site();
        fs::write(tmp.path().join("draft.html.bak"), "").unwrap();
        let entries = traverse(tmp.path(), 1, &["*.bak".to_string()]).unwrap();
        assert!(!names(&entries).contains(&"draft.html.bak".to_string()));
        assert!(names(&entries).contains(&"index.html".to_string()));
    }

    #[test]
    fn traverse_empty_root() {
        let tmp = TempDir::new().unwrap();
        assert!(traverse(tmp.path(), 5, &[]).unwrap().is_empty());
    }

    #[test]
    fn find_pages_substring_match() {
        let entries = vec![
            WalkEntry::file(SitePath::parse("index.html")),
            WalkEntry::file(SitePath::parse("about.htmlx")),
            WalkEntry::file(SitePath::parse("style.css")),
            WalkEntry::directory(SitePath::parse("docs.html")),
            WalkEntry::file(SitePath::parse("blog/post.html")),
        ];
        let pages: Vec<String> = find_pages(&entries, ".html")
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(pages, vec!["index.html", "about.htmlx", "blog/post.html"]);
    }
}
