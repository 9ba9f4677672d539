use super::whole_days;
use crate::types::metrics::IssueStagnationMetrics;
use crate::types::records::IssueRecord;
use crate::types::scoring::{clamp_score, round2, Score};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Closed issues sampled for the average time-to-close.
pub const CLOSED_SAMPLE_SIZE: usize = 100;

/// Scores issue health. `listed_bucket_days` selects which stagnation bucket
/// (30, 90 or 180) has its issue numbers listed in the metrics.
pub fn analyze_stagnation(
    issues: &[IssueRecord],
    now: DateTime<Utc>,
    listed_bucket_days: u32,
) -> IssueStagnationMetrics {
    let (open, closed): (Vec<&IssueRecord>, Vec<&IssueRecord>) =
        issues.iter().partition(|issue| issue.is_open());

    let mut stagnant_30 = Vec::new();
    let mut stagnant_90 = Vec::new();
    let mut stagnant_180 = Vec::new();
    for issue in &open {
        let idle = whole_days(issue.updated_at, now);
        if idle >= 180 {
            stagnant_180.push(issue.number);
        }
        if idle >= 90 {
            stagnant_90.push(issue.number);
        }
        if idle >= 30 {
            stagnant_30.push(issue.number);
        }
    }

    let mut recently_closed: Vec<(&IssueRecord, DateTime<Utc>)> = closed
        .iter()
        .filter_map(|issue| issue.closed_at.map(|closed_at| (*issue, closed_at)))
        .collect();
    recently_closed.sort_by(|a, b| b.1.cmp(&a.1));
    let close_times: Vec<f64> = recently_closed
        .iter()
        .take(CLOSED_SAMPLE_SIZE)
        .map(|(issue, closed_at)| whole_days(issue.created_at, *closed_at) as f64)
        .collect();
    let avg_close = if close_times.is_empty() {
        0.0
    } else {
        close_times.iter().sum::<f64>() / close_times.len() as f64
    };

    let ages: Vec<i64> = open
        .iter()
        .map(|issue| whole_days(issue.created_at, now))
        .collect();

    let counts = (stagnant_30.len(), stagnant_90.len(), stagnant_180.len());
    let listed = match listed_bucket_days {
        30 => stagnant_30,
        180 => stagnant_180,
        _ => stagnant_90,
    };

    let mut metrics = IssueStagnationMetrics {
        total_open_issues: open.len(),
        stagnant_issues_30_days: counts.0,
        stagnant_issues_90_days: counts.1,
        stagnant_issues_180_days: counts.2,
        avg_time_to_close_days: round2(avg_close),
        median_issue_age_days: round2(median(ages)),
        stagnant_issue_numbers: listed,
        score: 0.0,
    };
    metrics.score = stagnation_score(&metrics);
    debug!(
        score = metrics.score,
        open = metrics.total_open_issues,
        stagnant_90 = metrics.stagnant_issues_90_days,
        "issue stagnation scored"
    );
    metrics
}

/// Starts at 100 and deducts per nested stagnation rate, then for slow
/// closing. The three rate deductions overlap: an issue stale for
/// 180 days is charged in all of them.
pub fn stagnation_score(metrics: &IssueStagnationMetrics) -> Score {
    if metrics.total_open_issues == 0 {
        return 100.0;
    }
    let open = metrics.total_open_issues as f64;
    let mut score = 100.0;
    score -= metrics.stagnant_issues_30_days as f64 / open * 20.0;
    score -= metrics.stagnant_issues_90_days as f64 / open * 30.0;
    score -= metrics.stagnant_issues_180_days as f64 / open * 40.0;

    if metrics.avg_time_to_close_days > 30.0 {
        score -= ((metrics.avg_time_to_close_days - 30.0) / 10.0).min(10.0);
    }

    clamp_score(round2(score))
}

fn median(mut values: Vec<i64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) as f64 / 2.0
    } else {
        values[mid] as f64
    }
}
