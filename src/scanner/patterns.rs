use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};

use crate::common::errors::{CleanupError, Result};

// ─── Core types ───────────────────────────────────────────────────────────────

/// Which kinds of filesystem object a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Any,
    DirOnly,
    FileOnly,
}

/// Categories of entries that are removed unconditionally wherever they appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposable {
    /// Finder metadata
    DsStore,
    /// Python bytecode cache directory
    PyCache,
    /// Editor and tool backup files
    Backup,
    /// Stray compiled Python files
    CompiledPyc,
}

impl Disposable {
    /// Categories counted and reported before the bulk delete
    pub const COUNTED: [Disposable; 3] = [Disposable::DsStore, Disposable::PyCache, Disposable::Backup];

    /// Base-name pattern for this category
    pub fn pattern(&self) -> &'static str {
        match self {
            Disposable::DsStore => ".DS_Store",
            Disposable::PyCache => "__pycache__",
            Disposable::Backup => "*.backup",
            Disposable::CompiledPyc => "*.pyc",
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Disposable::DsStore => EntryKind::Any,
            Disposable::PyCache => EntryKind::DirOnly,
            Disposable::Backup | Disposable::CompiledPyc => EntryKind::FileOnly,
        }
    }
}

impl std::fmt::Display for Disposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disposable::DsStore => write!(f, ".DS_Store files"),
            Disposable::PyCache => write!(f, "__pycache__ directories"),
            Disposable::Backup => write!(f, "*.backup files"),
            Disposable::CompiledPyc => write!(f, "*.pyc files"),
        }
    }
}

// ─── Name matching ────────────────────────────────────────────────────────────

const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    // `*.backup` must also match a bare `.backup`, like `find -name`
    require_literal_leading_dot: false,
};

/// A compiled glob applied to a single path component
#[derive(Debug, Clone)]
pub struct NamePattern {
    raw: String,
    pattern: Pattern,
}

impl NamePattern {
    pub fn new(raw: &str) -> Result<Self> {
        let pattern = Pattern::new(raw).map_err(|source| CleanupError::Pattern {
            pattern: raw.to_string(),
            source,
        })?;
        Ok(Self {
            raw: raw.to_string(),
            pattern,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a base name. Names that are not valid UTF-8 never match.
    pub fn matches(&self, name: &std::ffi::OsStr) -> bool {
        name.to_str()
            .map(|n| self.pattern.matches_with(n, NAME_MATCH))
            .unwrap_or(false)
    }
}

/// Classifies directory entries into disposable categories
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: Vec<(Disposable, NamePattern)>,
}

impl Matcher {
    pub fn new(categories: &[Disposable]) -> Result<Self> {
        let rules = categories
            .iter()
            .map(|d| NamePattern::new(d.pattern()).map(|p| (*d, p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// First category whose pattern and entry kind both match
    pub fn classify(&self, name: &std::ffi::OsStr, is_dir: bool) -> Option<Disposable> {
        self.rules.iter().find_map(|(category, pattern)| {
            let kind_ok = match category.kind() {
                EntryKind::Any => true,
                EntryKind::DirOnly => is_dir,
                EntryKind::FileOnly => !is_dir,
            };
            (kind_ok && pattern.matches(name)).then_some(*category)
        })
    }
}
