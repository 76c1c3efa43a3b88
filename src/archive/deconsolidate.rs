use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{archive_path, index_path, parse_marker, ArchiveError};
use crate::config::AppConfig;
use crate::record::{InfoLine, Record};
use crate::scan;

/// What deconsolidating one root produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeconsolidateOutcome {
    pub sidecars_written: usize,
    /// Sidecars emptied because their index entry had no archive section.
    pub cleared: usize,
}

/// Splits `<root>/<prefix>.cinfo` back into individual record sidecars.
///
/// Section paths come from the index when indexing is enabled, from the
/// markers otherwise. When index and marker disagree the index wins with a
/// diagnostic. An index that runs out before the archive does is fatal: the
/// two files were not produced together, and writing further sidecars would
/// put records in the wrong places. Sidecars already written stay.
pub fn deconsolidate_root(
    root: &Path,
    config: &AppConfig,
) -> Result<DeconsolidateOutcome, ArchiveError> {
    if !root.is_dir() {
        return Err(ArchiveError::NotADirectory(root.display().to_string()));
    }

    let archive = File::open(archive_path(root, &config.prefix))?;
    let mut index = if config.use_index {
        Some(read_index(&index_path(root, &config.prefix))?)
    } else {
        None
    };

    let mut outcome = DeconsolidateOutcome::default();
    let mut section: Option<(PathBuf, Vec<String>)> = None;

    for line in BufReader::new(archive).lines() {
        let line = line?;
        match parse_marker(&line) {
            Some(marker_path) => {
                flush(section.take(), &mut outcome)?;
                let media = match index.as_mut() {
                    Some(entries) => match entries.next() {
                        Some(entry) => {
                            if entry != marker_path {
                                debug!(
                                    "Index path '{}' and marker path '{}' differ, using the index",
                                    entry, marker_path
                                );
                            }
                            PathBuf::from(entry)
                        }
                        None => {
                            return Err(ArchiveError::IndexExhausted(marker_path.to_string()))
                        }
                    },
                    None => PathBuf::from(marker_path),
                };
                section = Some((media, Vec::new()));
            }
            None => match section.as_mut() {
                Some((_, lines)) => lines.push(line),
                None => {
                    if !line.trim().is_empty() {
                        debug!("Dropping content before the first marker: '{}'", line);
                    }
                }
            },
        }
    }
    flush(section.take(), &mut outcome)?;

    // Entries with no matching section mean the record was cleared; give
    // each an empty sidecar.
    if let Some(entries) = index {
        for leftover in entries {
            let target = scan::sidecar_path(Path::new(&leftover));
            Record::new().write_atomic(&target)?;
            outcome.cleared += 1;
            debug!("Cleared {}", target.display());
        }
    }
    Ok(outcome)
}

fn read_index(path: &Path) -> Result<std::vec::IntoIter<String>, ArchiveError> {
    let file = File::open(path)?;
    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        entries.push(line?);
    }
    Ok(entries.into_iter())
}

fn flush(
    section: Option<(PathBuf, Vec<String>)>,
    outcome: &mut DeconsolidateOutcome,
) -> Result<(), ArchiveError> {
    if let Some((media, lines)) = section {
        let record = Record::from_lines(lines.into_iter().map(InfoLine::original));
        let target = scan::sidecar_path(&media);
        record.write_atomic(&target)?;
        outcome.sidecars_written += 1;
        debug!("Wrote {}", target.display());
    }
    Ok(())
}
