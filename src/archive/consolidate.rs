use std::path::Path;

use tracing::debug;

use super::{archive_path, format_marker, index_path, ArchiveError};
use crate::config::AppConfig;
use crate::record::{replace_file, InfoLine, Record};
use crate::scan;

/// What consolidating one root produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolidateOutcome {
    pub tracks: usize,
    pub sections_with_content: usize,
}

/// Merges every media file's record under `root` into `<root>/<prefix>.cinfo`,
/// plus the parallel `<root>/<prefix>.cindex` when indexing is enabled.
///
/// Every media file contributes a section, sidecar or not; a missing or
/// unreadable sidecar just leaves the section empty. Both output files are
/// replaced atomically, so re-collecting over a previous archive can never
/// leave it half-written.
pub fn consolidate_root(
    root: &Path,
    config: &AppConfig,
) -> Result<ConsolidateOutcome, ArchiveError> {
    if !root.is_dir() {
        return Err(ArchiveError::NotADirectory(root.display().to_string()));
    }

    let mut outcome = ConsolidateOutcome::default();
    let mut sections: Vec<InfoLine> = Vec::new();
    let mut index_entries: Vec<String> = Vec::new();

    for media in scan::media_files(root, &config.extensions) {
        outcome.tracks += 1;
        sections.push(InfoLine::original(format_marker(&media)));
        index_entries.push(media.display().to_string());

        let sidecar = scan::sidecar_path(&media);
        match Record::load(&sidecar) {
            Ok(record) => {
                if !record.is_empty() {
                    outcome.sections_with_content += 1;
                }
                sections.extend(record.lines().iter().cloned());
            }
            Err(e) => {
                debug!("Skipping unreadable record {}: {}", sidecar.display(), e);
            }
        }
    }

    // The archive is itself a record: non-blank lines plus one trailing
    // blank line, which is exactly how records serialize.
    Record::from_lines(sections).write_atomic(&archive_path(root, &config.prefix))?;

    if config.use_index {
        let mut listing = String::new();
        for entry in &index_entries {
            listing.push_str(entry);
            listing.push('\n');
        }
        replace_file(&index_path(root, &config.prefix), &listing)?;
    }
    Ok(outcome)
}
