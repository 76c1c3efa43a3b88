use std::io::{self, BufRead};

use regex::Regex;
use tracing::debug;

use super::command::{Command, CommandList};

/// Parses one script line into a command.
///
/// Returns `None` for blank lines, `#` comments, unrecognized verbs and
/// malformed commands; the last two are reported at debug level. Parsing
/// never fails fatally: a broken line is dropped and the rest of the
/// script still applies.
pub fn parse_line(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (trimmed, ""),
    };

    let parsed = match verb {
        "add" => parse_add(rest),
        "del" => parse_del(rest),
        "sub" => parse_sub(rest),
        _ => {
            debug!("Skipping unknown command '{}'", trimmed);
            return None;
        }
    };
    if parsed.is_none() {
        debug!("Skipping malformed '{}' command '{}'", verb, trimmed);
    }
    parsed
}

/// `add <key>=<value>`
fn parse_add(rest: &str) -> Option<Command> {
    let (key, value) = rest.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(Command::Add {
        key: key.to_string(),
        value: value.trim_start().to_string(),
    })
}

/// `del <key>[=<valuePattern>]`
fn parse_del(rest: &str) -> Option<Command> {
    let (key, pattern) = match rest.split_once('=') {
        Some((key, pattern)) => (key.trim(), Some(pattern.trim_start())),
        None => (rest.trim(), None),
    };
    if key.is_empty() {
        return None;
    }
    let pattern = match pattern {
        Some(source) => Some(compile_pattern(source)?),
        None => None,
    };
    Some(Command::Delete {
        key: key.to_string(),
        pattern,
    })
}

/// `sub <key>=<pattern>,<replacement>`. The first comma after the `=` is
/// the hard delimiter, so the pattern itself may not contain one.
fn parse_sub(rest: &str) -> Option<Command> {
    let (key, rest) = rest.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let (pattern, replacement) = rest.split_once(',')?;
    Some(Command::Substitute {
        key: key.to_string(),
        pattern: compile_pattern(pattern.trim_start())?,
        replacement: replacement.to_string(),
    })
}

fn compile_pattern(source: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!("Invalid pattern '{}': {}", source, e);
            None
        }
    }
}

/// Collects a whole command script from a line stream into the fixed,
/// ordered command list. Only read errors are fatal.
pub fn parse_script<R: BufRead>(reader: R) -> io::Result<CommandList> {
    let mut commands = Vec::new();
    for line in reader.lines() {
        if let Some(command) = parse_line(&line?) {
            commands.push(command);
        }
    }
    Ok(CommandList::new(commands))
}
