pub mod patterns;
pub mod walker;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::common::errors::{CleanupError, Result};
use crate::common::safety;
use patterns::{Disposable, Matcher};
use walker::FoundEntry;

/// Per-category counts reported before anything is removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisposableCounts {
    pub ds_store: usize,
    pub pycache: usize,
    pub backup: usize,
}

impl DisposableCounts {
    pub fn total(&self) -> usize {
        self.ds_store + self.pycache + self.backup
    }

    /// Counts paired with their category, in report order
    pub fn by_category(&self) -> [(Disposable, usize); 3] {
        [
            (Disposable::DsStore, self.ds_store),
            (Disposable::PyCache, self.pycache),
            (Disposable::Backup, self.backup),
        ]
    }
}

/// Result of the count phase: every disposable entry under the root
#[derive(Debug, Clone)]
pub struct DisposableScan {
    pub root: PathBuf,
    pub ds_store: Vec<FoundEntry>,
    pub pycache: Vec<FoundEntry>,
    pub backup: Vec<FoundEntry>,
}

impl DisposableScan {
    pub fn counts(&self) -> DisposableCounts {
        DisposableCounts {
            ds_store: self.ds_store.len(),
            pycache: self.pycache.len(),
            backup: self.backup.len(),
        }
    }

    /// All found entries, metadata files first, then caches, then backups
    pub fn entries(&self) -> impl Iterator<Item = &FoundEntry> {
        self.ds_store
            .iter()
            .chain(self.pycache.iter())
            .chain(self.backup.iter())
    }
}

/// Check that the root exists, is a directory, and is not a system location
pub fn validate_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(CleanupError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }
    if safety::is_protected_root(root) {
        return Err(CleanupError::ProtectedRoot {
            path: root.to_path_buf(),
        });
    }
    Ok(root.to_path_buf())
}

/// Count phase: enumerate `.DS_Store`, `__pycache__` and `*.backup` at every depth
pub fn scan(root: &Path) -> Result<DisposableScan> {
    let matcher = Matcher::new(&Disposable::COUNTED)?;
    let mut result = DisposableScan {
        root: root.to_path_buf(),
        ds_store: Vec::new(),
        pycache: Vec::new(),
        backup: Vec::new(),
    };

    for (category, entry) in walker::find_matching(root, &matcher) {
        match category {
            Disposable::DsStore => result.ds_store.push(entry),
            Disposable::PyCache => result.pycache.push(entry),
            Disposable::Backup => result.backup.push(entry),
            Disposable::CompiledPyc => {}
        }
    }

    let counts = result.counts();
    info!(
        root = %root.display(),
        ds_store = counts.ds_store,
        pycache = counts.pycache,
        backup = counts.backup,
        "scan complete"
    );

    Ok(result)
}
