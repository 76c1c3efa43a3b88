use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Media extensions recognized when the configuration does not override them.
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &["mp3", "ogg", "flac"];

/// Suffix appended to a media file name to locate its record.
pub const SIDECAR_SUFFIX: &str = ".info";

pub fn default_extensions() -> Vec<String> {
    DEFAULT_MEDIA_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Check if a path has one of the recognized media extensions.
pub fn is_media_file(path: &Path, extensions: &[String]) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    ext.map(|e| extensions.iter().any(|known| *known == e))
        .unwrap_or(false)
}

/// The record path for a media file: the full file name plus [`SIDECAR_SUFFIX`].
pub fn sidecar_path(media: &Path) -> PathBuf {
    let mut name = media.as_os_str().to_os_string();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Media files under `root`, in a deterministic order (entries sorted by file
/// name at every directory level). Record sidecars and archive bookkeeping
/// files never qualify since their extensions are not media extensions.
/// Unreadable entries are skipped.
pub fn media_files<'a>(
    root: &Path,
    extensions: &'a [String],
) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(move |path| is_media_file(path, extensions))
}
