//! # housekeep
//!
//! Routine housekeeping for a project tree. A single run:
//!
//! - **Disposables**: removes `.DS_Store`, `__pycache__/` and `*.backup` at every depth
//! - **Bytecode**: removes stray `*.pyc` files
//! - **Log rotation**: keeps the five most recent `logs/*.log`
//! - **Cache**: empties `cache/` without removing it
//! - **Exports**: removes `exports/**/*.tmp`
//! - **Report**: space reclaimed and remaining usage of `cache`, `logs`, `exports`
//!
//! Every step tolerates missing paths and failed removals; a run always
//! reaches the report.

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod scanner;

pub use cleaner::{run_cleanup, CleanMode, CleanupReport};
pub use common::config::Config;
