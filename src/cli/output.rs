use colored::*;

use crate::cleaner::{CleanMode, CleanupReport};
use crate::common::format::{describe_removal, format_elapsed, format_reclaimed, format_size};
use crate::scanner::DisposableCounts;

/// Print the count phase, before anything is removed
pub fn print_counts(counts: &DisposableCounts, root: &std::path::Path) {
    println!();
    println!(
        "  {} Housekeeping {}",
        "🧹",
        root.display().to_string().cyan()
    );
    println!("{}", "─".repeat(60).dimmed());
    for (category, count) in counts.by_category() {
        let n = if count == 0 {
            count.to_string().dimmed()
        } else {
            count.to_string().yellow()
        };
        println!("  {:<28} {}", format!("{}:", category), n);
    }
}

/// Print the cleanup report in human-readable format
pub fn print_report(report: &CleanupReport, verbose: bool) {
    let dry_run = report.mode == CleanMode::DryRun;

    let title = if dry_run { "Dry run" } else { "Cleanup" };
    println!();
    println!("  {}", title.bold().underline());
    println!();

    for step in &report.steps {
        println!(
            "    {:<32} {:<28} {}",
            step.step.to_string(),
            describe_removal(step.removed, dry_run).cyan(),
            format_size(step.bytes_freed).dimmed()
        );
    }

    println!();
    println!("{}", "─".repeat(60).dimmed());
    let (icon, outcome) = if dry_run {
        ("ℹ️", "Dry run complete — would reclaim")
    } else {
        ("✨", "Cleanup complete — reclaimed")
    };
    println!(
        "  {} {} {} ({}) in {}",
        icon,
        outcome,
        format_reclaimed(report.total_bytes_freed),
        describe_removal(report.total_removed, dry_run),
        format_elapsed(report.duration_secs).cyan()
    );

    if !report.usage.is_empty() {
        println!();
        println!("  {} Disk usage:", "💾");
        for usage in &report.usage {
            println!(
                "  {:>10}\t{}",
                format_size(usage.size_bytes),
                usage.name.display()
            );
        }
    }

    if verbose {
        let errors: Vec<&String> = report.errors().collect();
        if !errors.is_empty() {
            println!();
            println!(
                "  {} {}",
                "⚠".yellow(),
                format!("{} entries could not be removed:", errors.len()).yellow()
            );
            for error in errors {
                println!("    {} {}", "→".dimmed(), error.dimmed());
            }
        }
    }
    println!();
}

/// Print the cleanup report as JSON
pub fn print_report_json(report: &CleanupReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }
}

/// Print a minimal summary
pub fn print_report_quiet(report: &CleanupReport) {
    println!(
        "{}  {}",
        report.total_removed,
        format_size(report.total_bytes_freed)
    );
}
