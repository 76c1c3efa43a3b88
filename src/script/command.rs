use regex::Regex;

/// One edit operation from a command script.
///
/// `Delete` and `Substitute` carry user-supplied patterns, compiled once at
/// parse time. Patterns are searched, not anchored; script authors anchor
/// explicitly when they mean whole-value matches.
#[derive(Debug, Clone)]
pub enum Command {
    /// Insert a `key=value` line into every processed record.
    Add { key: String, value: String },
    /// Remove lines whose key matches; with a pattern, only lines whose
    /// value matches it.
    Delete { key: String, pattern: Option<Regex> },
    /// Rewrite matching lines with a find-and-replace over the whole line
    /// content. First match only; `$n` references capture groups.
    Substitute {
        key: String,
        pattern: Regex,
        replacement: String,
    },
}

impl Command {
    /// The record line an `Add` injects, `None` for the other variants.
    pub fn added_line(&self) -> Option<String> {
        match self {
            Command::Add { key, value } => Some(format!("{}={}", key, value)),
            _ => None,
        }
    }
}

/// The ordered command list applied to every record of a batch run.
///
/// The list is collected in full before any record is processed and is
/// immutable afterwards; a command's position in it is its identity for
/// origin comparisons.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    commands: Vec<Command>,
}

impl CommandList {
    pub fn new(commands: Vec<Command>) -> Self {
        CommandList { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Commands paired with their list position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Command)> {
        self.commands.iter().enumerate()
    }

    /// The `(index, line)` pairs every `Add` command injects, in list order.
    pub fn additions(&self) -> impl Iterator<Item = (usize, String)> + '_ {
        self.iter()
            .filter_map(|(index, command)| command.added_line().map(|line| (index, line)))
    }
}
