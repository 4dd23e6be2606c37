//! Errors raised while scanning a site. Every variant aborts the scan.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("'{}' does not exist", root.display())]
    MissingRoot { root: PathBuf },

    #[error("failed to list '{}'", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read page '{page}'")]
    UnreadablePage {
        page: String,
        #[source]
        source: io::Error,
    },
}
