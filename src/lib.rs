//! Trackinfo Tools Library
//!
//! Batch tooling over per-track metadata records: an ordered
//! command-application engine for `key=value` record files, and the
//! collect/uncollect pair that packs many records into one archive (plus a
//! path index) and unpacks them again.

pub mod archive;
pub mod config;
pub mod editor;
pub mod record;
pub mod scan;
pub mod script;

// Re-export commonly used types for convenience
pub use editor::{apply, edit_root, InsertionPolicy};
pub use record::{InfoLine, Origin, Record, TagMap};
pub use script::{parse_script, Command, CommandList};
