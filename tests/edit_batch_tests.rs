//! End-to-end batch edits driven by parsed command scripts.

mod common;

use common::{commands, config, MediaTree};
use trackinfo::archive::{consolidate_root, deconsolidate_root};
use trackinfo::editor::{edit_root, InsertionPolicy};

// =============================================================================
// Per-file record edits
// =============================================================================

#[test]
fn test_edit_rewrites_every_record_under_root() {
    let tree = MediaTree::new();
    tree.add_track_with_record("a.ogg", "genre=Old\ntitle=A\n\n");
    tree.add_track_with_record("b.mp3", "title=B\n\n");
    tree.add_track("c.flac");

    let outcome = edit_root(
        tree.root(),
        &commands("del genre\nadd genre=Rock"),
        &config(InsertionPolicy::AtBeginning, true),
    )
    .unwrap();

    assert_eq!(outcome.records_edited, 3);
    assert_eq!(tree.record("a.ogg"), "genre=Rock\ntitle=A\n\n");
    assert_eq!(tree.record("b.mp3"), "genre=Rock\ntitle=B\n\n");
    // No record existed for c.flac; the edit created one.
    assert_eq!(tree.record("c.flac"), "genre=Rock\n\n");
}

#[test]
fn test_substitution_applies_across_records() {
    let tree = MediaTree::new();
    tree.add_track_with_record("a.ogg", "year=2003\n\n");
    tree.add_track_with_record("b.ogg", "year=1999\n\n");

    edit_root(
        tree.root(),
        &commands("sub year=2003,2004"),
        &config(InsertionPolicy::AtBeginning, true),
    )
    .unwrap();

    assert_eq!(tree.record("a.ogg"), "year=2004\n\n");
    assert_eq!(tree.record("b.ogg"), "year=1999\n\n");
}

#[test]
fn test_script_junk_lines_are_ignored() {
    let tree = MediaTree::new();
    tree.add_track_with_record("a.ogg", "title=A\n\n");

    edit_root(
        tree.root(),
        &commands("# a comment\n\nbogus line\nadd rating=5\nsub broken\n"),
        &config(InsertionPolicy::AtBeginning, true),
    )
    .unwrap();

    assert_eq!(tree.record("a.ogg"), "rating=5\ntitle=A\n\n");
}

// =============================================================================
// Consolidated archive edits
// =============================================================================

#[test]
fn test_edit_archive_then_uncollect_spreads_additions() {
    let tree = MediaTree::new();
    tree.add_track_with_record("a.ogg", "title=A\nartist=Old\n\n");
    tree.add_track_with_record("b.mp3", "title=B\n\n");

    let cfg = config(InsertionPolicy::AtMarker, true);
    consolidate_root(tree.root(), &cfg).unwrap();
    edit_root(tree.root(), &commands("add rating=5\ndel artist"), &cfg).unwrap();
    deconsolidate_root(tree.root(), &cfg).unwrap();

    assert_eq!(tree.record("a.ogg"), "rating=5\ntitle=A\n\n");
    assert_eq!(tree.record("b.mp3"), "rating=5\ntitle=B\n\n");
}

#[test]
fn test_archive_edit_touches_only_the_archive() {
    let tree = MediaTree::new();
    tree.add_track_with_record("a.ogg", "title=A\n\n");

    let cfg = config(InsertionPolicy::AtMarker, true);
    consolidate_root(tree.root(), &cfg).unwrap();
    edit_root(tree.root(), &commands("add rating=5"), &cfg).unwrap();

    // The sidecar is untouched until the archive is unpacked again.
    assert_eq!(tree.record("a.ogg"), "title=A\n\n");
    assert!(tree.archive().contains("rating=5"));
}
