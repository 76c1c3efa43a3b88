//! Applies an ordered command list to one record.
//!
//! The engine is a single pass over a line stream plus an injection queue.
//! Every line remembers which command produced it, and a command only ever
//! touches lines produced before its own position in the list. That is what
//! lets a script like `del genre` + `add genre=Rock` replace a tag: the
//! delete runs over the old lines, the freshly added line outranks it.

mod batch;

pub use batch::{edit_root, EditOutcome};

use std::collections::VecDeque;
use std::io;

use thiserror::Error;

use crate::archive::is_marker;
use crate::record::{InfoLine, Record};
use crate::script::{Command, CommandList};

/// Errors that can occur while running a batch edit.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// Where `add` commands inject their lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPolicy {
    /// Once, at the very start of the record. Used for standalone records.
    AtBeginning,
    /// After every section marker. Used when the record being edited is a
    /// whole consolidated archive, so each section gets its own copy.
    AtMarker,
}

/// Applies `commands` to `record` and returns the rewritten record.
///
/// Pure in-memory transformation; loading and rewriting files is the batch
/// runner's job. Blank lines never survive (the record type drops them).
pub fn apply(commands: &CommandList, policy: InsertionPolicy, record: &Record) -> Record {
    let mut queue: VecDeque<InfoLine> = VecDeque::new();
    if policy == InsertionPolicy::AtBeginning {
        inject_additions(&mut queue, commands);
    }

    let mut stream = record.lines().iter();
    let mut out: Vec<InfoLine> = Vec::new();
    loop {
        // Queue first; the stream only advances when no injected line is
        // pending, so additions land ahead of the content they precede.
        let line = match queue.pop_front() {
            Some(line) => line,
            None => match stream.next() {
                Some(line) => {
                    if policy == InsertionPolicy::AtMarker && is_marker(line.content()) {
                        // Markers are structural: emit untouched and duplicate
                        // the additions into the section the marker opens.
                        out.push(line.clone());
                        inject_additions(&mut queue, commands);
                        continue;
                    }
                    line.clone()
                }
                None => break,
            },
        };
        if let Some(line) = evaluate(commands, line) {
            out.push(line);
        }
    }
    Record::from_lines(out)
}

fn inject_additions(queue: &mut VecDeque<InfoLine>, commands: &CommandList) {
    queue.extend(
        commands
            .additions()
            .map(|(index, content)| InfoLine::injected(content, index)),
    );
}

/// Runs every command the line's origin yields to, in list order. Returns
/// `None` when a delete claimed the line; deletion stops evaluation.
fn evaluate(commands: &CommandList, mut line: InfoLine) -> Option<InfoLine> {
    for (index, command) in commands.iter() {
        if !line.origin().yields_to(index) {
            continue;
        }
        match command {
            Command::Add { .. } => {}
            Command::Delete { key, pattern } => {
                if let Some((line_key, value)) = line.key_value() {
                    if line_key == key && pattern.as_ref().map_or(true, |p| p.is_match(value)) {
                        return None;
                    }
                }
            }
            Command::Substitute {
                key,
                pattern,
                replacement,
            } => {
                let key_matches = line.key().map_or(false, |k| k == key);
                if key_matches && pattern.is_match(line.content()) {
                    // First match only, over the whole line; the key portion
                    // is fair game and `$n` expands capture groups. Later
                    // commands see the rewritten line.
                    let rewritten = pattern
                        .replace(line.content(), replacement.as_str())
                        .into_owned();
                    line.set_content(rewritten);
                }
            }
        }
    }
    Some(line)
}
