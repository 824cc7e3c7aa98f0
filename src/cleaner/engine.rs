use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::remove;
use super::report::{self, CleanupReport, StepKind, StepReport};
use super::retention;
use crate::common::config::Config;
use crate::common::errors::Result;
use crate::scanner::patterns::{Disposable, Matcher, NamePattern};
use crate::scanner::walker::{self, FoundEntry};
use crate::scanner::{self, DisposableScan};

/// Clean mode determines whether entries are actually removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanMode {
    /// Show what would be done without doing it
    DryRun,
    /// Permanent removal
    Delete,
}

impl std::fmt::Display for CleanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanMode::DryRun => write!(f, "dry_run"),
            CleanMode::Delete => write!(f, "delete"),
        }
    }
}

/// Validate the root, count disposables, then run every cleanup step.
///
/// This is the library entry point; it prints nothing. The only errors
/// returned are an invalid root or an uncompilable config pattern.
pub fn run_cleanup(root: &Path, config: &Config, mode: CleanMode) -> Result<CleanupReport> {
    let root = scanner::validate_root(root)?;
    let found = scanner::scan(&root)?;
    clean(&found, config, mode, false)
}

/// Run the cleanup steps against an already completed count phase.
///
/// Steps run in order and never abort each other:
/// - disposables found by the scan (`.DS_Store`, `__pycache__`, `*.backup`)
/// - `*.pyc` anywhere under root
/// - log retention in the logs directory
/// - cache directory contents
/// - temp files under the exports directory
pub fn clean(
    found: &DisposableScan,
    config: &Config,
    mode: CleanMode,
    show_progress: bool,
) -> Result<CleanupReport> {
    config.validate()?;
    let start = Instant::now();
    let root = found.root.as_path();

    let pyc_matcher = Matcher::new(&[Disposable::CompiledPyc])?;
    let log_pattern = NamePattern::new(&config.log_pattern)?;
    let export_pattern = NamePattern::new(&config.export_pattern)?;

    let mut report = CleanupReport::new(root, mode, found.counts());
    let mut sweeper = Sweeper::new(mode);

    let pb = if show_progress {
        let pb = ProgressBar::new(StepKind::ALL.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("━━░"),
        );
        Some(pb)
    } else {
        None
    };

    for kind in StepKind::ALL {
        if let Some(ref pb) = pb {
            pb.set_message(kind.to_string());
        }

        let step = match kind {
            StepKind::Disposables => sweeper.sweep(kind, found.entries().cloned()),
            StepKind::CompiledArtifacts => {
                let pyc = walker::find_matching(root, &pyc_matcher)
                    .into_iter()
                    .map(|(_, entry)| entry);
                sweeper.sweep(kind, pyc)
            }
            StepKind::LogRetention => {
                let logs = walker::find_files(&config.logs_path(root), &log_pattern, false);
                debug!(found = logs.len(), keep = config.log_retention, "log files listed");
                let expired = retention::select_expired(logs, config.log_retention);
                sweeper.sweep(kind, expired)
            }
            StepKind::CacheClear => {
                sweeper.sweep(kind, walker::list_children(&config.cache_path(root)))
            }
            StepKind::ExportTemp => {
                let temps = walker::find_files(&config.exports_path(root), &export_pattern, true);
                sweeper.sweep(kind, temps)
            }
        };

        report.steps.push(step);

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(ref pb) = pb {
        pb.finish_and_clear();
    }

    report.usage = report::measure_usage(root, config);
    report.recalculate();
    report.duration_secs = start.elapsed().as_secs_f64();

    info!(
        mode = %mode,
        removed = report.total_removed,
        bytes_freed = report.total_bytes_freed,
        "cleanup complete"
    );

    Ok(report)
}

/// Removes entries for each step.
///
/// A dry run leaves the tree untouched, so later steps still see what earlier
/// steps claimed. Claimed paths are skipped, and their bytes are left out of
/// any later directory that contains them. A real run needs no bookkeeping:
/// each step lists the tree after the previous one has removed its entries.
struct Sweeper {
    mode: CleanMode,
    claimed: HashSet<PathBuf>,
}

impl Sweeper {
    fn new(mode: CleanMode) -> Self {
        Self {
            mode,
            claimed: HashSet::new(),
        }
    }

    fn is_claimed(&self, path: &Path) -> bool {
        !self.claimed.is_empty() && path.ancestors().any(|a| self.claimed.contains(a))
    }

    /// Bytes a directory would still free once claimed descendants are gone
    fn unclaimed_size(&self, entry: &FoundEntry) -> u64 {
        if !entry.is_dir || self.claimed.is_empty() {
            return entry.size_bytes;
        }
        walker::dir_size_excluding(&entry.path, |p| self.claimed.contains(p))
    }

    fn sweep(&mut self, kind: StepKind, entries: impl IntoIterator<Item = FoundEntry>) -> StepReport {
        let mut step = StepReport::new(kind);

        for entry in entries {
            match self.mode {
                CleanMode::DryRun => {
                    if self.is_claimed(&entry.path) {
                        continue;
                    }
                    let bytes = self.unclaimed_size(&entry);
                    debug!(path = %entry.path.display(), bytes, "would remove");
                    step.record(bytes);
                    self.claimed.insert(entry.path);
                }
                CleanMode::Delete => match remove::remove_path(&entry.path, entry.is_dir) {
                    Ok(true) => {
                        debug!(path = %entry.path.display(), bytes = entry.size_bytes, "removed");
                        step.record(entry.size_bytes);
                    }
                    Ok(false) => {
                        debug!(path = %entry.path.display(), "already gone");
                    }
                    Err(e) => {
                        warn!(error = %e, "removal failed, continuing");
                        step.errors.push(e.to_string());
                    }
                },
            }
        }

        info!(
            step = %kind,
            removed = step.removed,
            bytes_freed = step.bytes_freed,
            "step complete"
        );
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_sweeper_dry_run_dedupes_nested() {
        let mut sweeper = Sweeper::new(CleanMode::DryRun);
        let parent = FoundEntry {
            path: PathBuf::from("a/__pycache__"),
            is_dir: true,
            size_bytes: 100,
            modified: None,
        };
        let child = FoundEntry {
            path: PathBuf::from("a/__pycache__/x.pyc"),
            is_dir: false,
            size_bytes: 10,
            modified: None,
        };

        let first = sweeper.sweep(StepKind::Disposables, vec![parent]);
        let second = sweeper.sweep(StepKind::CompiledArtifacts, vec![child]);
        assert_eq!(first.removed, 1);
        assert_eq!(second.removed, 0);
    }

    #[test]
    fn test_sweeper_dry_run_discounts_claimed_descendants() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("cache/sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join(".DS_Store"), "meta".repeat(4096)).unwrap();
        fs::write(sub.join("keep.bin"), "blob".repeat(4096)).unwrap();

        let mut sweeper = Sweeper::new(CleanMode::DryRun);
        let meta = walker::list_children(&sub)
            .into_iter()
            .filter(|e| e.path.ends_with(".DS_Store"));
        let first = sweeper.sweep(StepKind::Disposables, meta);

        let children = walker::list_children(&dir.path().join("cache"));
        let full = children[0].size_bytes;
        let second = sweeper.sweep(StepKind::CacheClear, children);

        assert_eq!(second.removed, 1);
        assert_eq!(first.bytes_freed + second.bytes_freed, full);
        assert_eq!(second.bytes_freed, walker::dir_size(&sub) - first.bytes_freed);
    }

    #[test]
    fn test_sweeper_delete_keeps_no_claims() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.backup"), b"x").unwrap();

        let mut sweeper = Sweeper::new(CleanMode::Delete);
        let step = sweeper.sweep(StepKind::Disposables, walker::list_children(dir.path()));

        assert_eq!(step.removed, 1);
        assert!(sweeper.claimed.is_empty());
        assert!(!dir.path().join("a.backup").exists());
    }

    #[test]
    fn test_sweeper_missing_entry_not_counted() {
        let dir = tempfile::tempdir().unwrap();
        let mut sweeper = Sweeper::new(CleanMode::Delete);
        let gone = FoundEntry {
            path: dir.path().join("vanished.tmp"),
            is_dir: false,
            size_bytes: 4096,
            modified: None,
        };

        let step = sweeper.sweep(StepKind::ExportTemp, vec![gone]);
        assert_eq!(step.removed, 0);
        assert_eq!(step.bytes_freed, 0);
        assert!(step.errors.is_empty());
    }

    #[test]
    fn test_clean_reports_every_step() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.backup"), b"x").unwrap();

        let report = run_cleanup(dir.path(), &Config::default(), CleanMode::Delete).unwrap();
        assert_eq!(report.steps.len(), StepKind::ALL.len());
        assert_eq!(report.counts.backup, 1);
        assert_eq!(report.step(StepKind::Disposables).unwrap().removed, 1);
        assert!(!dir.path().join("notes.backup").exists());
    }

    #[test]
    fn test_invalid_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(run_cleanup(&missing, &Config::default(), CleanMode::Delete).is_err());
    }
}
