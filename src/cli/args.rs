use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// housekeep — routine project-tree housekeeping
#[derive(Parser, Debug)]
#[command(
    name = "housekeep",
    version,
    about = "Routine housekeeping for a project tree",
    long_about = "housekeep removes .DS_Store files, __pycache__ directories, *.backup and\n\
                   *.pyc files, rotates logs/*.log (keeping the newest five), empties cache/,\n\
                   removes exports/**/*.tmp, then reports the space reclaimed.",
    after_help = "EXAMPLES:\n  \
        housekeep                              Clean the current directory\n  \
        housekeep --dry-run                    Show what would be removed\n  \
        housekeep -C ~/projects/app            Clean another directory\n  \
        housekeep --keep-logs 10               Keep the newest ten logs\n  \
        housekeep --format json                Machine-readable report\n  \
        housekeep completions zsh              Generate zsh completions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Root directory to clean
    #[arg(long, short = 'C', value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// TOML file overriding the built-in layout and retention
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of most recent log files to keep
    #[arg(long, value_name = "N")]
    pub keep_logs: Option<usize>,

    /// Simulate — show what would be removed
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (debug logging on stderr, list suppressed errors)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl Cli {
    /// `--quiet` wins over `--format`
    pub fn output_format(&self) -> OutputFormat {
        if self.quiet {
            OutputFormat::Quiet
        } else {
            self.format
        }
    }
}
