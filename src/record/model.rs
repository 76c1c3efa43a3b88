use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::line::InfoLine;
use super::tags::TagMap;

/// The metadata record for one media file: an ordered sequence of lines.
///
/// A record never holds blank lines; they are insignificant in the on-disk
/// format and are dropped whenever one is read or assembled. Serialization
/// appends exactly one trailing blank line, so an empty record serializes to
/// a single blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    lines: Vec<InfoLine>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Builds a record from already-tagged lines, dropping blanks.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = InfoLine>,
    {
        Record {
            lines: lines.into_iter().filter(|l| !l.is_blank()).collect(),
        }
    }

    /// Reads a record from a line stream. Every non-blank line becomes an
    /// `Original` line, comments and unparsed lines included.
    pub fn parse<R: BufRead>(reader: R) -> io::Result<Record> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            lines.push(InfoLine::original(line));
        }
        Ok(Record { lines })
    }

    /// `parse` over an in-memory string. Handy in tests and for section
    /// contents that were already read elsewhere.
    pub fn parse_str(text: &str) -> Record {
        Record::from_lines(text.lines().map(InfoLine::original))
    }

    /// Loads the record at `path`. A missing file is an empty record, not
    /// an error; any other I/O failure propagates.
    pub fn load(path: &Path) -> io::Result<Record> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Record::new()),
            Err(e) => return Err(e),
        };
        Record::parse(BufReader::new(file))
    }

    pub fn lines(&self) -> &[InfoLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The ordered multimap view over this record's `key=value` lines.
    pub fn tags(&self) -> TagMap {
        let mut tags = TagMap::new();
        for line in &self.lines {
            if let Some((key, value)) = line.key_value() {
                tags.insert(key, value);
            }
        }
        tags
    }

    /// On-disk form: every line newline-terminated, then one blank line.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line.content());
            out.push('\n');
        }
        out.push('\n');
        out
    }

    /// Replaces the file at `path` atomically. A failure mid-write leaves
    /// the original untouched.
    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        replace_file(path, &self.serialize())
    }
}

/// Writes `contents` to a scoped temp file in the target's directory, then
/// persists it over `path`. Every exit path cleans up the temp file.
pub(crate) fn replace_file(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
