use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::errors::{CleanupError, Result};
use super::safety;

/// Housekeeping configuration.
///
/// Every field has a default matching the standard project layout, so a
/// run without a config file behaves exactly like the built-in rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Number of most recent log files kept
    #[serde(default = "default_log_retention")]
    pub log_retention: usize,

    /// Log directory, relative to root
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,

    /// Cache directory whose contents are cleared, relative to root
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Export directory swept for temp files, relative to root
    #[serde(default = "default_exports_dir")]
    pub exports_dir: PathBuf,

    /// Glob for rotated log files
    #[serde(default = "default_log_pattern")]
    pub log_pattern: String,

    /// Glob for temporary export files
    #[serde(default = "default_export_pattern")]
    pub export_pattern: String,

    /// Maximum number of directory usage lines in the report
    #[serde(default = "default_usage_lines")]
    pub usage_lines: usize,
}

fn default_log_retention() -> usize {
    5
}
fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}
fn default_exports_dir() -> PathBuf {
    PathBuf::from("exports")
}
fn default_log_pattern() -> String {
    "*.log".to_string()
}
fn default_export_pattern() -> String {
    "*.tmp".to_string()
}
fn default_usage_lines() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_retention: default_log_retention(),
            logs_dir: default_logs_dir(),
            cache_dir: default_cache_dir(),
            exports_dir: default_exports_dir(),
            log_pattern: default_log_pattern(),
            export_pattern: default_export_pattern(),
            usage_lines: default_usage_lines(),
        }
    }
}

impl Config {
    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| CleanupError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| CleanupError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject directories that escape the root and patterns that don't compile
    pub fn validate(&self) -> Result<()> {
        for (key, dir) in [
            ("logs_dir", &self.logs_dir),
            ("cache_dir", &self.cache_dir),
            ("exports_dir", &self.exports_dir),
        ] {
            if !safety::is_contained(dir) {
                return Err(CleanupError::InvalidConfig {
                    message: format!(
                        "{} must be a relative path inside the root, got '{}'",
                        key,
                        dir.display()
                    ),
                });
            }
        }

        for pattern in [&self.log_pattern, &self.export_pattern] {
            glob::Pattern::new(pattern).map_err(|source| CleanupError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
        }

        Ok(())
    }

    pub fn logs_path(&self, root: &Path) -> PathBuf {
        root.join(&self.logs_dir)
    }

    pub fn cache_path(&self, root: &Path) -> PathBuf {
        root.join(&self.cache_dir)
    }

    pub fn exports_path(&self, root: &Path) -> PathBuf {
        root.join(&self.exports_dir)
    }

    /// Directories summarized in the final report, in display order
    pub fn report_dirs(&self) -> [&Path; 3] {
        [
            self.cache_dir.as_path(),
            self.logs_dir.as_path(),
            self.exports_dir.as_path(),
        ]
    }
}
