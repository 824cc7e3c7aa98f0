pub mod engine;
pub mod remove;
pub mod report;
pub mod retention;

pub use engine::{clean, run_cleanup, CleanMode};
pub use report::{CleanupReport, DirUsage, StepKind, StepReport};
