/// Where a record line came from.
///
/// Lines read from disk are `Original`; lines injected while a command list
/// runs carry the index of the `add` command that produced them. The index
/// decides which commands may touch the line: only commands positioned
/// strictly after the producer ever see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Present in the record before any command ran.
    Original,
    /// Inserted by the command at this 0-based position in the command list.
    Command(usize),
}

impl Origin {
    /// True when the command at `index` is allowed to affect a line with
    /// this origin. `Original` compares below any real command index.
    pub fn yields_to(&self, index: usize) -> bool {
        match self {
            Origin::Original => true,
            Origin::Command(own) => *own < index,
        }
    }
}

/// One line of a record, together with its origin.
///
/// The content is either a `key=value` pair or an opaque line (comments,
/// anything without a key). No trailing newline is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoLine {
    content: String,
    origin: Origin,
}

impl InfoLine {
    /// A line that was already present on disk.
    pub fn original(content: impl Into<String>) -> Self {
        InfoLine {
            content: content.into(),
            origin: Origin::Original,
        }
    }

    /// A line injected by the command at `command_index`.
    pub fn injected(content: impl Into<String>, command_index: usize) -> Self {
        InfoLine {
            content: content.into(),
            origin: Origin::Command(command_index),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Rewrites the content in place, keeping the origin. Used by the
    /// editor when a substitution fires.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Comment lines are never matched by key lookups.
    pub fn is_comment(&self) -> bool {
        self.content.starts_with('#')
    }

    /// Splits `key=value` at the first `=`. Returns `None` for comments,
    /// lines without a `=`, and lines whose key part is empty; those are
    /// opaque and no command matches them. Key and value are verbatim.
    pub fn key_value(&self) -> Option<(&str, &str)> {
        if self.is_comment() {
            return None;
        }
        match self.content.split_once('=') {
            Some((key, value)) if !key.is_empty() => Some((key, value)),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key_value().map(|(key, _)| key)
    }
}
