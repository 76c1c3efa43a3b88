mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};

use crate::editor::InsertionPolicy;
use crate::scan;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub prefix: String,
    pub use_index: bool,
    pub insertion_policy: InsertionPolicy,
    pub extensions: Option<Vec<String>>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            prefix: "default".to_string(),
            use_index: true,
            insertion_policy: InsertionPolicy::AtMarker,
            extensions: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Filename stem of `<prefix>.cinfo` and `<prefix>.cindex`.
    pub prefix: String,
    /// Whether collect writes and uncollect consumes the index.
    pub use_index: bool,
    /// Where `edit` puts added lines, which also decides whether it targets
    /// per-file records or the consolidated archive.
    pub insertion_policy: InsertionPolicy,
    /// Recognized media extensions, lowercase, without the leading dot.
    pub extensions: Vec<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let prefix = file.prefix.unwrap_or_else(|| cli.prefix.clone());
        if prefix.is_empty() {
            bail!("prefix must not be empty");
        }

        let use_index = file.use_index.unwrap_or(cli.use_index);

        let insertion_policy = file
            .edit_target
            .and_then(|s| parse_edit_target(&s))
            .unwrap_or(cli.insertion_policy);

        let extensions: Vec<String> = file
            .extensions
            .or_else(|| cli.extensions.clone())
            .unwrap_or_else(scan::default_extensions)
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect();
        if extensions.is_empty() {
            bail!("extensions must not be empty");
        }

        Ok(Self {
            prefix,
            use_index,
            insertion_policy,
            extensions,
        })
    }
}

/// Parses an `edit_target` string into an insertion policy.
fn parse_edit_target(s: &str) -> Option<InsertionPolicy> {
    if s.eq_ignore_ascii_case("info") {
        Some(InsertionPolicy::AtBeginning)
    } else if s.eq_ignore_ascii_case("cinfo") {
        Some(InsertionPolicy::AtMarker)
    } else {
        None
    }
}
