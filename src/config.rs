use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ScanError;
use crate::score::SortKey;

/// File looked up at the scan root when `--config` is not given.
pub const CONFIG_FILE: &str = "noisemap.toml";

/// Rows shown by the table report when neither flag nor config set it.
pub const DEFAULT_TOP: usize = 20;

/// Optional per-project settings. Every field may be omitted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extra directory names to skip, on top of the built-in set.
    pub ignore_dirs: Vec<String>,
    pub sort_by: Option<SortKey>,
    pub top: Option<usize>,
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ScanError> {
        toml::from_str(text).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Load `explicit` if given (it must exist), otherwise `noisemap.toml`
    /// under `root` if present, otherwise defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ScanError> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (root.join(CONFIG_FILE), false),
        };

        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!("loading config from {}", path.display());
                Self::parse(&text, &path)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(err) => Err(config_io_error(path, err)),
        }
    }
}

fn config_io_error(path: PathBuf, err: io::Error) -> ScanError {
    ScanError::Config {
        path,
        message: err.to_string(),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
