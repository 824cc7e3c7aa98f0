use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::patterns::{Disposable, Matcher, NamePattern};

/// A filesystem entry found during traversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub size_bytes: u64,
    pub modified: Option<SystemTime>,
}

impl FoundEntry {
    fn from_walk(entry: &DirEntry) -> Self {
        let is_dir = entry.file_type().is_dir();
        let metadata = entry.metadata().ok();
        let size_bytes = if is_dir {
            dir_size(entry.path())
        } else {
            metadata.as_ref().map(allocated_size).unwrap_or(0)
        };

        FoundEntry {
            path: entry.path().to_path_buf(),
            is_dir,
            size_bytes,
            modified: metadata.and_then(|m| m.modified().ok()),
        }
    }

    fn from_path(path: PathBuf) -> Option<Self> {
        // Never follow links: a symlinked entry is removed as itself
        let metadata = std::fs::symlink_metadata(&path).ok()?;
        let is_dir = metadata.is_dir();
        let size_bytes = if is_dir {
            dir_size(&path)
        } else {
            allocated_size(&metadata)
        };

        Some(FoundEntry {
            path,
            is_dir,
            size_bytes,
            modified: metadata.modified().ok(),
        })
    }
}

/// Physical disk usage of a single entry
#[cfg(unix)]
fn allocated_size(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.blocks() * 512
}

#[cfg(not(unix))]
fn allocated_size(metadata: &Metadata) -> u64 {
    metadata.len()
}

/// Walk `root` and collect every entry the matcher classifies.
///
/// Matched directories are not descended into; their size covers the
/// whole subtree. Unreadable entries are skipped.
pub fn find_matching(root: &Path, matcher: &Matcher) -> Vec<(Disposable, FoundEntry)> {
    let mut results = Vec::new();

    if !root.is_dir() {
        return results;
    }

    let mut walker = WalkDir::new(root).follow_links(false).min_depth(1).into_iter();

    while let Some(next) = walker.next() {
        let entry = match next {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        if let Some(category) = matcher.classify(entry.file_name(), is_dir) {
            results.push((category, FoundEntry::from_walk(&entry)));
            if is_dir {
                walker.skip_current_dir();
            }
        }
    }

    results
}

/// List non-directory entries under `dir` whose name matches `pattern`.
/// An absent directory yields nothing.
pub fn find_files(dir: &Path, pattern: &NamePattern, recursive: bool) -> Vec<FoundEntry> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "directory absent, nothing to list");
        return Vec::new();
    }

    let walker = if recursive {
        WalkDir::new(dir).follow_links(false).min_depth(1)
    } else {
        WalkDir::new(dir).follow_links(false).min_depth(1).max_depth(1)
    };

    walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir() && pattern.matches(e.file_name()))
        .map(|e| FoundEntry::from_walk(&e))
        .collect()
}

/// Direct children of `dir`, of any type. An absent directory yields nothing.
pub fn list_children(dir: &Path) -> Vec<FoundEntry> {
    let read = match std::fs::read_dir(dir) {
        Ok(r) => r,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "cannot list directory");
            return Vec::new();
        }
    };

    let mut children: Vec<FoundEntry> = read
        .filter_map(|e| e.ok())
        .filter_map(|e| FoundEntry::from_path(e.path()))
        .collect();
    children.sort_by(|a, b| a.path.cmp(&b.path));
    children
}

/// Calculate total size of a directory (physical disk usage)
pub fn dir_size(path: &Path) -> u64 {
    dir_size_excluding(path, |_| false)
}

/// Directory size, leaving out every subtree for which `skip` holds
pub fn dir_size_excluding(path: &Path, mut skip: impl FnMut(&Path) -> bool) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !skip(e.path()))
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .map(|e| e.metadata().map(|m| allocated_size(&m)).unwrap_or(0))
        .sum()
}
