use std::path::{Component, Path};

/// Roots that must NEVER be swept, even when explicitly requested.
const PROTECTED_ROOTS: &[&str] = &[
    "/",
    "/System",
    "/Applications",
    "/Users",
    "/Library",
    "/home",
    "/usr",
    "/bin",
    "/sbin",
    "/var",
    "/etc",
    "/opt",
    "/private",
    "/proc",
    "/sys",
    "/dev",
    "/boot",
    "/Volumes",
];

/// Check if a root directory is a system location that must never be swept.
///
/// Accepts both the path as given and its canonical form so that
/// `--root ../../..` cannot sneak past the check.
pub fn is_protected_root(path: &Path) -> bool {
    let matches = |p: &Path| {
        let s = p.to_string_lossy();
        PROTECTED_ROOTS.iter().any(|protected| s == *protected)
    };

    if matches(path) {
        return true;
    }

    match std::fs::canonicalize(path) {
        Ok(canonical) => matches(&canonical),
        Err(_) => false,
    }
}

/// A configured sub-directory must stay inside the root:
/// relative, non-empty, and made only of normal components.
pub fn is_contained(rel: &Path) -> bool {
    let mut components = rel.components().peekable();
    if components.peek().is_none() {
        return false;
    }
    components.all(|c| matches!(c, Component::Normal(_)))
}
