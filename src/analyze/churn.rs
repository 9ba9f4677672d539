use super::Window;
use crate::types::metrics::{CodeChurnMetrics, HotspotFile};
use crate::types::records::CommitRecord;
use crate::types::scoring::{clamp_score, round2, Score};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_CHURN_DAYS: u32 = 90;
pub const HOTSPOT_LIMIT: usize = 10;
/// A file is high churn when touched by more than this share of commits.
pub const HIGH_CHURN_SHARE: f64 = 0.2;

#[derive(Debug, Default)]
struct FileTally {
    additions: u64,
    deletions: u64,
    commits: usize,
}

/// Aggregate line totals come only from per-commit `stats`; per-file lists
/// feed file-level tallies only. Either may be absent on any commit.
pub fn analyze_churn(commits: &[CommitRecord], now: DateTime<Utc>, days: u32) -> CodeChurnMetrics {
    let window = Window::days_before(now, days);
    let in_window: Vec<&CommitRecord> = commits
        .iter()
        .filter(|commit| window.contains_commit(commit))
        .collect();
    let commit_count = in_window.len();

    let mut total_additions = 0_u64;
    let mut total_deletions = 0_u64;
    let mut files: HashMap<&str, FileTally> = HashMap::new();

    for commit in &in_window {
        if let Some(stats) = commit.stats {
            total_additions = total_additions.saturating_add(stats.additions);
            total_deletions = total_deletions.saturating_add(stats.deletions);
        }
        for change in commit.files.iter().flatten() {
            let tally = files.entry(change.filename.as_str()).or_default();
            tally.additions = tally.additions.saturating_add(change.additions);
            tally.deletions = tally.deletions.saturating_add(change.deletions);
            tally.commits += 1;
        }
    }

    let total_changes = total_additions as f64 + total_deletions as f64;
    let churn_rate = total_changes / commit_count.max(1) as f64;
    let avg_changes_per_commit = if commit_count == 0 {
        0.0
    } else {
        total_changes / commit_count as f64
    };

    let mut hotspots: Vec<HotspotFile> = files
        .iter()
        .map(|(file, tally)| HotspotFile {
            file: (*file).to_string(),
            changes: tally.additions.saturating_add(tally.deletions),
            commits: tally.commits,
        })
        .collect();
    hotspots.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.file.cmp(&b.file)));
    hotspots.truncate(HOTSPOT_LIMIT);

    let threshold = commit_count as f64 * HIGH_CHURN_SHARE;
    let mut high_churn: Vec<String> = files
        .iter()
        .filter(|(_, tally)| tally.commits as f64 > threshold)
        .map(|(file, _)| (*file).to_string())
        .collect();
    high_churn.sort();

    let mut metrics = CodeChurnMetrics {
        total_files_changed: files.len(),
        total_additions,
        total_deletions,
        churn_rate: round2(churn_rate),
        files_with_high_churn: high_churn,
        avg_changes_per_commit: round2(avg_changes_per_commit),
        hotspot_files: hotspots,
        score: 0.0,
    };
    metrics.score = churn_score(&metrics, commit_count);
    debug!(
        score = metrics.score,
        commits = commit_count,
        files = metrics.total_files_changed,
        "code churn scored"
    );
    metrics
}

pub fn churn_score(metrics: &CodeChurnMetrics, commit_count: usize) -> Score {
    if commit_count == 0 {
        return 100.0;
    }
    let mut score = 100.0;

    if metrics.avg_changes_per_commit > 500.0 {
        score -= 20.0;
    } else if metrics.avg_changes_per_commit > 300.0 {
        score -= 10.0;
    }

    score -= (metrics.files_with_high_churn.len() as f64 * 5.0).min(30.0);

    if metrics.total_additions > 0 {
        let deletion_ratio = metrics.total_deletions as f64 / metrics.total_additions as f64;
        if deletion_ratio > 0.8 {
            score -= 15.0;
        }
    }

    clamp_score(round2(score))
}
