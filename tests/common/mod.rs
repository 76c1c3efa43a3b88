//! Common test infrastructure
//!
//! Builds throwaway music directory trees with record sidecars for the
//! batch tools to chew on. Tests should only import from this module.

#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use trackinfo::config::{AppConfig, CliConfig};
use trackinfo::editor::InsertionPolicy;
use trackinfo::script::{parse_script, CommandList};

/// A scratch directory laid out like a music folder.
pub struct MediaTree {
    dir: TempDir,
}

impl MediaTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Creates an empty media file, parent directories included.
    pub fn add_track(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "").unwrap();
        path
    }

    /// Creates a media file together with its record sidecar.
    pub fn add_track_with_record(&self, name: &str, record: &str) -> PathBuf {
        let path = self.add_track(name);
        fs::write(sidecar_of(&path), record).unwrap();
        path
    }

    pub fn record(&self, name: &str) -> String {
        fs::read_to_string(self.record_path(name)).unwrap()
    }

    pub fn has_record(&self, name: &str) -> bool {
        self.record_path(name).exists()
    }

    pub fn remove_record(&self, name: &str) {
        fs::remove_file(self.record_path(name)).unwrap();
    }

    pub fn archive(&self) -> String {
        fs::read_to_string(self.dir.path().join("default.cinfo")).unwrap()
    }

    pub fn index(&self) -> String {
        fs::read_to_string(self.dir.path().join("default.cindex")).unwrap()
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(format!("{}.info", name))
    }
}

pub fn sidecar_of(media: &Path) -> PathBuf {
    let mut name = media.as_os_str().to_os_string();
    name.push(".info");
    PathBuf::from(name)
}

/// Resolved configuration with everything else at defaults.
pub fn config(policy: InsertionPolicy, use_index: bool) -> AppConfig {
    let cli = CliConfig {
        insertion_policy: policy,
        use_index,
        ..Default::default()
    };
    AppConfig::resolve(&cli, None).unwrap()
}

/// Parses a whole command script, panicking on read errors.
pub fn commands(script: &str) -> CommandList {
    parse_script(Cursor::new(script)).unwrap()
}
