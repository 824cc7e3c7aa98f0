use std::path::PathBuf;

use thiserror::Error;

/// Typed errors for housekeeping operations.
/// The binary wraps these in `anyhow` at the top level,
/// but modules stay precise about what failed and where.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// File system operation failed
    #[error("I/O error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root is missing or not a directory
    #[error("Root directory '{}' does not exist or is not a directory", .path.display())]
    InvalidRoot { path: PathBuf },

    /// Root is a system location we refuse to sweep
    #[error("SAFETY: Refusing to clean protected path: '{}'", .path.display())]
    ProtectedRoot { path: PathBuf },

    /// Config file could not be read or parsed
    #[error("Config error in '{}': {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// Config values are inconsistent
    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    /// Name pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl CleanupError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CleanupError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanupError>;
