//! The command script: a small line-oriented language describing tag edits.
//!
//! A script is parsed once into an ordered [`CommandList`]; the order is
//! what ties each command to the lines it may affect during application.

mod command;
mod parser;

pub use command::{Command, CommandList};
pub use parser::{parse_line, parse_script};
