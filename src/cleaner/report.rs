use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::engine::CleanMode;
use crate::common::config::Config;
use crate::scanner::walker;
use crate::scanner::DisposableCounts;

/// The removal steps of a cleanup run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Disposables,
    CompiledArtifacts,
    LogRetention,
    CacheClear,
    ExportTemp,
}

impl StepKind {
    pub const ALL: [StepKind; 5] = [
        StepKind::Disposables,
        StepKind::CompiledArtifacts,
        StepKind::LogRetention,
        StepKind::CacheClear,
        StepKind::ExportTemp,
    ];
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepKind::Disposables => write!(f, "Metadata, caches and backups"),
            StepKind::CompiledArtifacts => write!(f, "Compiled artifacts"),
            StepKind::LogRetention => write!(f, "Log retention"),
            StepKind::CacheClear => write!(f, "Cache clear"),
            StepKind::ExportTemp => write!(f, "Export temp files"),
        }
    }
}

/// Outcome of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub step: StepKind,
    pub removed: usize,
    pub bytes_freed: u64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
}

impl StepReport {
    pub fn new(step: StepKind) -> Self {
        Self {
            step,
            removed: 0,
            bytes_freed: 0,
            errors: Vec::new(),
        }
    }

    pub fn record(&mut self, size_bytes: u64) {
        self.removed += 1;
        self.bytes_freed += size_bytes;
    }
}

/// Remaining disk usage of one reported directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirUsage {
    pub name: PathBuf,
    pub size_bytes: u64,
}

/// Report from a cleanup run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupReport {
    pub root: PathBuf,
    pub mode: CleanMode,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub counts: DisposableCounts,
    pub steps: Vec<StepReport>,
    pub usage: Vec<DirUsage>,
    pub total_removed: usize,
    pub total_bytes_freed: u64,
}

impl CleanupReport {
    pub fn new(root: &Path, mode: CleanMode, counts: DisposableCounts) -> Self {
        Self {
            root: root.to_path_buf(),
            mode,
            started_at: Utc::now(),
            duration_secs: 0.0,
            counts,
            steps: Vec::new(),
            usage: Vec::new(),
            total_removed: 0,
            total_bytes_freed: 0,
        }
    }

    /// Recalculate totals from step reports
    pub fn recalculate(&mut self) {
        self.total_removed = self.steps.iter().map(|s| s.removed).sum();
        self.total_bytes_freed = self.steps.iter().map(|s| s.bytes_freed).sum();
    }

    pub fn step(&self, kind: StepKind) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == kind)
    }

    /// Suppressed failures across all steps
    pub fn errors(&self) -> impl Iterator<Item = &String> {
        self.steps.iter().flat_map(|s| s.errors.iter())
    }
}

/// Summarized usage of the report directories that exist, capped at
/// `config.usage_lines` entries.
pub fn measure_usage(root: &Path, config: &Config) -> Vec<DirUsage> {
    config
        .report_dirs()
        .into_iter()
        .filter(|name| root.join(name).is_dir())
        .take(config.usage_lines)
        .map(|name| DirUsage {
            name: name.to_path_buf(),
            size_bytes: walker::dir_size(&root.join(name)),
        })
        .collect()
}
