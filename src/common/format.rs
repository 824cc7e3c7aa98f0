use colored::*;

/// Size in the style of `du -sh`: one decimal below 10 units, rounded up.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [char; 5] = ['K', 'M', 'G', 'T', 'P'];

    if bytes < 1024 {
        return format!("{}B", bytes);
    }

    let mut value = bytes as f64;
    for unit in UNITS {
        value /= 1024.0;
        if value < 10.0 {
            let tenths = (value * 10.0).ceil() / 10.0;
            return if tenths < 10.0 {
                format!("{:.1}{}", tenths, unit)
            } else {
                format!("10{}", unit)
            };
        }
        let whole = value.ceil();
        if whole < 1024.0 {
            return format!("{:.0}{}", whole, unit);
        }
    }
    format!("{:.0}P", value.ceil())
}

/// Reclaimed total, dimmed when nothing was freed
pub fn format_reclaimed(bytes: u64) -> ColoredString {
    if bytes == 0 {
        format_size(bytes).dimmed()
    } else {
        format_size(bytes).green().bold()
    }
}

/// What a step did to its entries, phrased for the run mode
pub fn describe_removal(count: usize, dry_run: bool) -> String {
    let noun = if count == 1 { "entry" } else { "entries" };
    match (count, dry_run) {
        (0, _) => "nothing to remove".to_string(),
        (n, true) => format!("{} {} would be removed", n, noun),
        (n, false) => format!("{} {} removed", n, noun),
    }
}

/// Elapsed run time; housekeeping runs are short, so no minutes
pub fn format_elapsed(secs: f64) -> String {
    if secs < 1.0 {
        format!("{}ms", (secs * 1000.0).round() as u64)
    } else {
        format!("{:.2}s", secs)
    }
}
