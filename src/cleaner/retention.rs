use std::time::SystemTime;

use crate::scanner::walker::FoundEntry;

/// Split log files into the ones to keep and the ones past retention.
///
/// Files are ordered newest first by modification time; ties fall back
/// to descending path so the choice is deterministic. The first `keep`
/// survive, the rest are returned for deletion. Unknown mtimes sort as
/// oldest.
pub fn select_expired(mut logs: Vec<FoundEntry>, keep: usize) -> Vec<FoundEntry> {
    logs.sort_by(|a, b| {
        let a_time = a.modified.unwrap_or(SystemTime::UNIX_EPOCH);
        let b_time = b.modified.unwrap_or(SystemTime::UNIX_EPOCH);
        b_time.cmp(&a_time).then_with(|| b.path.cmp(&a.path))
    });

    if logs.len() <= keep {
        return Vec::new();
    }
    logs.split_off(keep)
}
