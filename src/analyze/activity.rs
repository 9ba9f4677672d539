use super::Window;
use crate::types::metrics::ActivityMetrics;
use crate::types::records::{CommitRecord, IssueRecord, PullRequestRecord};
use crate::types::scoring::{clamp_score, round2, Score};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

pub fn analyze_activity(
    commits: &[CommitRecord],
    pull_requests: &[PullRequestRecord],
    issues: &[IssueRecord],
    now: DateTime<Utc>,
) -> ActivityMetrics {
    let last_30 = Window::days_before(now, 30);
    let last_90 = Window::days_before(now, 90);

    let recent_commits: Vec<&CommitRecord> = commits
        .iter()
        .filter(|commit| last_30.contains_commit(commit))
        .collect();
    let commits_90 = commits
        .iter()
        .filter(|commit| last_90.contains_commit(commit))
        .count();

    let prs_opened = pull_requests
        .iter()
        .filter(|pr| last_30.contains(pr.created_at))
        .count();
    let prs_merged = pull_requests
        .iter()
        .filter(|pr| pr.merged_at.is_some_and(|merged| last_30.contains(merged)))
        .count();

    let issues_opened = issues
        .iter()
        .filter(|issue| last_30.contains(issue.created_at))
        .count();
    let issues_closed = issues
        .iter()
        .filter(|issue| issue.closed_at.is_some_and(|closed| last_30.contains(closed)))
        .count();

    let active_contributors = recent_commits
        .iter()
        .filter(|commit| commit.has_known_author())
        .map(|commit| commit.author.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut metrics = ActivityMetrics {
        commits_last_30_days: recent_commits.len(),
        commits_last_90_days: commits_90,
        prs_opened_last_30_days: prs_opened,
        prs_merged_last_30_days: prs_merged,
        issues_opened_last_30_days: issues_opened,
        issues_closed_last_30_days: issues_closed,
        active_contributors_last_30_days: active_contributors,
        score: 0.0,
    };
    metrics.score = activity_score(&metrics);
    debug!(score = metrics.score, commits_30 = metrics.commits_last_30_days, "activity scored");
    metrics
}

/// Additive score: commits 40, PRs opened 15, merge ratio 10, issues 20,
/// contributors 15. Each term is capped before summing.
pub fn activity_score(metrics: &ActivityMetrics) -> Score {
    let commit_term = (metrics.commits_last_30_days as f64 / 10.0 * 40.0).min(40.0);
    let pr_open_term = (metrics.prs_opened_last_30_days as f64 / 5.0 * 15.0).min(15.0);

    let merge_rate = if metrics.prs_opened_last_30_days > 0 {
        metrics.prs_merged_last_30_days as f64 / metrics.prs_opened_last_30_days as f64
    } else {
        0.0
    };
    let pr_merge_term = merge_rate * 10.0;

    // No new issues is neutral-positive rather than penalized.
    let issue_term = if metrics.issues_opened_last_30_days > 0 {
        let close_rate =
            metrics.issues_closed_last_30_days as f64 / metrics.issues_opened_last_30_days as f64;
        (close_rate * 20.0).min(20.0)
    } else {
        15.0
    };

    let contributor_term =
        (metrics.active_contributors_last_30_days as f64 / 5.0 * 15.0).min(15.0);

    clamp_score(round2(
        commit_term + pr_open_term + pr_merge_term + issue_term + contributor_term,
    ))
}
