use anyhow::{Context, Result};
use clap::Parser;

use housekeep::cleaner::{self, CleanMode};
use housekeep::cli::args::{Cli, Commands, CompletionShell, OutputFormat};
use housekeep::cli::output;
use housekeep::common::config::Config;
use housekeep::scanner;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("housekeep=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Some(Commands::Completions { ref shell }) => cmd_completions(shell),
        None => cmd_run(&cli),
    }
}

// ─── Run ──────────────────────────────────────────────────────────────────────

fn cmd_run(cli: &Cli) -> Result<()> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(keep) = cli.keep_logs {
        config.log_retention = keep;
    }

    let mode = if cli.dry_run {
        CleanMode::DryRun
    } else {
        CleanMode::Delete
    };
    let format = cli.output_format();
    let human = format == OutputFormat::Human;

    let root = scanner::validate_root(&cli.root)
        .with_context(|| format!("Cannot clean {}", cli.root.display()))?;

    // Count phase is printed before anything is removed
    let found = scanner::scan(&root).context("Failed to scan for disposable entries")?;
    if human {
        output::print_counts(&found.counts(), &root);
    }

    let report = cleaner::clean(&found, &config, mode, human)
        .context("Failed to run cleanup")?;

    match format {
        OutputFormat::Human => output::print_report(&report, cli.verbose),
        OutputFormat::Json => output::print_report_json(&report),
        OutputFormat::Quiet => output::print_report_quiet(&report),
    }

    Ok(())
}

// ─── Completions ──────────────────────────────────────────────────────────────

fn cmd_completions(shell: &CompletionShell) -> Result<()> {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => clap_complete::Shell::Bash,
        CompletionShell::Zsh => clap_complete::Shell::Zsh,
        CompletionShell::Fish => clap_complete::Shell::Fish,
    };
    clap_complete::generate(shell, &mut cmd, "housekeep", &mut std::io::stdout());
    Ok(())
}
