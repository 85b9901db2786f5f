use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde::Serialize;

use crate::error::ScanError;
use crate::language::Language;

/// Directory names that are never descended into.
pub const SKIP_DIRS: &[&str] = &[
    "vendor",
    "node_modules",
    ".git",
    ".hg",
    "__pycache__",
    "dist",
    "build",
    ".next",
    "target",
];

/// A discovered source file. `path` is absolute, `rel_path` is relative to
/// the scan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub rel_path: PathBuf,
    pub language: Language,
}

/// Whether a directory with this name should be pruned from the walk.
/// Hidden directories (leading `.`) are always pruned.
pub fn is_excluded_dir(name: &OsStr, skip: &HashSet<String>) -> bool {
    match name.to_str() {
        Some(n) => n.starts_with('.') || skip.contains(n),
        None => false,
    }
}

/// Build a directory walker that prunes ignored and hidden directories.
///
/// `.gitignore` rules are deliberately not applied: only the fixed skip set
/// plus `extra_ignore` decide what is pruned. Entries are yielded in
/// file-name order within each directory.
pub fn walk(root: &Path, extra_ignore: &[String]) -> ignore::Walk {
    let skip: HashSet<String> = SKIP_DIRS
        .iter()
        .map(|s| s.to_string())
        .chain(extra_ignore.iter().cloned())
        .collect();

    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return !is_excluded_dir(entry.file_name(), &skip);
            }
            true
        })
        .build()
}

/// Enumerate every classifiable source file under `root`.
///
/// Failing to read `root` itself aborts with [`ScanError::Walk`]; any other
/// unreadable entry is logged and skipped.
pub fn discover(root: &Path, extra_ignore: &[String]) -> Result<Vec<SourceFile>, ScanError> {
    let walk_err = |source| ScanError::Walk {
        path: root.to_path_buf(),
        source,
    };
    fs::read_dir(root).map_err(walk_err)?;
    let abs_root = std::path::absolute(root).map_err(walk_err)?;

    let mut files = Vec::new();
    for entry in walk(&abs_root, extra_ignore) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Some(language) = Language::detect(path) else {
            continue;
        };

        let rel_path = path
            .strip_prefix(&abs_root)
            .unwrap_or(path)
            .to_path_buf();

        files.push(SourceFile {
            path: path.to_path_buf(),
            rel_path,
            language,
        });
    }

    tracing::debug!(count = files.len(), root = %abs_root.display(), "discovery finished");
    Ok(files)
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
