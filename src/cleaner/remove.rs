use std::io::ErrorKind;
use std::path::Path;

use crate::common::errors::{CleanupError, Result};

/// Delete a single file or directory permanently.
///
/// Returns `Ok(false)` when the path is already gone; a missing path is
/// never an error. Directories are removed recursively, anything else
/// (including symlinks) is unlinked without following it.
pub fn remove_path(path: &Path, is_dir: bool) -> Result<bool> {
    let result = if is_dir {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CleanupError::io(path, e)),
    }
}
