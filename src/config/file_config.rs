use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Filename stem of the archive and index files.
    pub prefix: Option<String>,
    /// Whether collect/uncollect maintain the `.cindex` file.
    pub use_index: Option<bool>,
    /// What `edit` rewrites: "info" for per-file records, "cinfo" for the
    /// consolidated archive.
    pub edit_target: Option<String>,
    /// Media extensions, without the leading dot.
    pub extensions: Option<Vec<String>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
