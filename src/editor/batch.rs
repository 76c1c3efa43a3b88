use std::path::Path;

use tracing::debug;

use super::{apply, EditError, InsertionPolicy};
use crate::archive;
use crate::config::AppConfig;
use crate::record::Record;
use crate::scan;
use crate::script::CommandList;

/// What a batch edit did to one root.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditOutcome {
    pub records_edited: usize,
}

/// Applies the command list to the records under `root`.
///
/// With [`InsertionPolicy::AtMarker`] the root's consolidated archive is the
/// single record being edited; with [`InsertionPolicy::AtBeginning`] every
/// media file's sidecar is rewritten in place. A target that does not exist
/// yet starts as an empty record and gets created by the rewrite.
pub fn edit_root(
    root: &Path,
    commands: &CommandList,
    config: &AppConfig,
) -> Result<EditOutcome, EditError> {
    if !root.is_dir() {
        return Err(EditError::NotADirectory(root.display().to_string()));
    }

    let mut outcome = EditOutcome::default();
    match config.insertion_policy {
        InsertionPolicy::AtMarker => {
            let target = archive::archive_path(root, &config.prefix);
            edit_file(&target, commands, InsertionPolicy::AtMarker)?;
            outcome.records_edited += 1;
        }
        InsertionPolicy::AtBeginning => {
            for media in scan::media_files(root, &config.extensions) {
                let target = scan::sidecar_path(&media);
                edit_file(&target, commands, InsertionPolicy::AtBeginning)?;
                outcome.records_edited += 1;
            }
        }
    }
    Ok(outcome)
}

fn edit_file(
    target: &Path,
    commands: &CommandList,
    policy: InsertionPolicy,
) -> Result<(), EditError> {
    let record = Record::load(target)?;
    let edited = apply(commands, policy, &record);
    edited.write_atomic(target)?;
    debug!("Rewrote {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, CliConfig};
    use crate::script::parse_script;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn config(policy: InsertionPolicy) -> AppConfig {
        let cli = CliConfig {
            insertion_policy: policy,
            ..Default::default()
        };
        AppConfig::resolve(&cli, None).unwrap()
    }

    fn commands(script: &str) -> CommandList {
        parse_script(Cursor::new(script)).unwrap()
    }

    #[test]
    fn test_edit_root_rejects_non_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, "").unwrap();

        let result = edit_root(&file, &commands(""), &config(InsertionPolicy::AtBeginning));
        assert!(matches!(result, Err(EditError::NotADirectory(_))));
    }

    #[test]
    fn test_edit_sidecars_in_place() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("a.ogg"), "").unwrap();
        fs::write(root.join("a.ogg.info"), "genre=Old\ntitle=A\n\n").unwrap();
        fs::write(root.join("b.mp3"), "").unwrap();

        let outcome = edit_root(
            root,
            &commands("del genre\nadd genre=Rock"),
            &config(InsertionPolicy::AtBeginning),
        )
        .unwrap();

        assert_eq!(outcome.records_edited, 2);
        assert_eq!(
            fs::read_to_string(root.join("a.ogg.info")).unwrap(),
            "genre=Rock\ntitle=A\n\n"
        );
        // The record for b.mp3 did not exist; the edit created it.
        assert_eq!(
            fs::read_to_string(root.join("b.mp3.info")).unwrap(),
            "genre=Rock\n\n"
        );
    }

    #[test]
    fn test_edit_archive_at_markers() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(
            root.join("default.cinfo"),
            "=== /m/a.ogg\ntitle=A\n=== /m/b.ogg\ntitle=B\n\n",
        )
        .unwrap();

        let outcome = edit_root(
            root,
            &commands("add rating=5"),
            &config(InsertionPolicy::AtMarker),
        )
        .unwrap();

        assert_eq!(outcome.records_edited, 1);
        assert_eq!(
            fs::read_to_string(root.join("default.cinfo")).unwrap(),
            "=== /m/a.ogg\nrating=5\ntitle=A\n=== /m/b.ogg\nrating=5\ntitle=B\n\n"
        );
    }

    #[test]
    fn test_edit_missing_archive_writes_empty_one() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        edit_root(
            root,
            &commands("add rating=5"),
            &config(InsertionPolicy::AtMarker),
        )
        .unwrap();

        // No markers in an empty record, so nothing was injected.
        assert_eq!(
            fs::read_to_string(root.join("default.cinfo")).unwrap(),
            "\n"
        );
    }

    #[test]
    fn test_empty_script_normalizes_blank_lines_only() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("a.ogg"), "").unwrap();
        fs::write(root.join("a.ogg.info"), "title=A\n\nartist=B\n").unwrap();

        edit_root(root, &commands(""), &config(InsertionPolicy::AtBeginning)).unwrap();

        assert_eq!(
            fs::read_to_string(root.join("a.ogg.info")).unwrap(),
            "title=A\nartist=B\n\n"
        );
    }
}
