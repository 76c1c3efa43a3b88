//! The consolidated archive format: many records merged into one file,
//! delimited by path markers, with a parallel index of target paths.

mod consolidate;
mod deconsolidate;

pub use consolidate::{consolidate_root, ConsolidateOutcome};
pub use deconsolidate::{deconsolidate_root, DeconsolidateOutcome};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while consolidating or deconsolidating.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Index exhausted before archive, next section: {0}")]
    IndexExhausted(String),
}

/// Prefix of the line opening each archive section; the rest of the line is
/// the section's media file path.
pub const MARKER_PREFIX: &str = "=== ";

pub fn format_marker(path: &Path) -> String {
    format!("{}{}", MARKER_PREFIX, path.display())
}

pub fn is_marker(line: &str) -> bool {
    line.starts_with(MARKER_PREFIX)
}

/// The path embedded in a marker line, `None` for ordinary content lines.
pub fn parse_marker(line: &str) -> Option<&str> {
    line.strip_prefix(MARKER_PREFIX)
}

/// `<root>/<prefix>.cinfo`
pub fn archive_path(root: &Path, prefix: &str) -> PathBuf {
    root.join(format!("{}.cinfo", prefix))
}

/// `<root>/<prefix>.cindex`
pub fn index_path(root: &Path, prefix: &str) -> PathBuf {
    root.join(format!("{}.cindex", prefix))
}
