use super::Window;
use crate::types::metrics::ContributorMetrics;
use crate::types::records::{CommitRecord, ContributorRecord};
use crate::types::scoring::{clamp_score, round2, Score};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Lifetime contributions needed to count as a core contributor.
pub const CORE_CONTRIBUTION_THRESHOLD: u64 = 10;
pub const DISTRIBUTION_LIMIT: usize = 10;

pub fn analyze_contributors(
    contributors: &[ContributorRecord],
    commits: &[CommitRecord],
    now: DateTime<Utc>,
) -> ContributorMetrics {
    let last_30 = Window::days_before(now, 30);
    let last_90 = Window::days_before(now, 90);

    let active_30: HashSet<&str> = commits
        .iter()
        .filter(|commit| last_30.contains_commit(commit))
        .map(|commit| commit.author.as_str())
        .collect();
    let active_90: HashSet<&str> = commits
        .iter()
        .filter(|commit| last_90.contains_commit(commit))
        .map(|commit| commit.author.as_str())
        .collect();

    let core = contributors
        .iter()
        .filter(|contributor| contributor.contributions >= CORE_CONTRIBUTION_THRESHOLD)
        .count();

    let mut metrics = ContributorMetrics {
        total_contributors: contributors.len(),
        active_contributors_30_days: active_30.len(),
        active_contributors_90_days: active_90.len(),
        new_contributors_30_days: estimate_new_contributors(&active_30, &active_90),
        core_contributors: core,
        contribution_distribution: top_contributors(contributors, DISTRIBUTION_LIMIT),
        bus_factor: bus_factor(contributors),
        score: 0.0,
    };
    metrics.score = contributor_score(&metrics);
    debug!(
        score = metrics.score,
        bus_factor = metrics.bus_factor,
        active_30 = metrics.active_contributors_30_days,
        "contributors scored"
    );
    metrics
}

/// Approximates newcomers as the 30-day active count minus authors seen only
/// in the 30..90 day range, floored at zero.
///
/// This is not a first-commit detector. An author whose first commit is in
/// the last 30 days but who also committed 31 days ago is not "new", yet an
/// established author who simply went quiet lowers the estimate. The number
/// is a rough growth signal and is reported as such.
pub fn estimate_new_contributors(active_30: &HashSet<&str>, active_90: &HashSet<&str>) -> usize {
    let lapsed = active_90.difference(active_30).count();
    active_30.len().saturating_sub(lapsed)
}

/// Smallest number of top contributors whose lifetime contributions reach
/// half of the total. Always at least 1.
pub fn bus_factor(contributors: &[ContributorRecord]) -> usize {
    if contributors.is_empty() {
        return 1;
    }
    let mut counts: Vec<u64> = contributors
        .iter()
        .map(|contributor| contributor.contributions)
        .collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));

    let total: u128 = counts.iter().map(|&count| u128::from(count)).sum();
    let mut cumulative = 0_u128;
    let mut factor = 0;
    for count in counts {
        cumulative += u128::from(count);
        factor += 1;
        if cumulative * 2 >= total {
            break;
        }
    }
    factor.max(1)
}

fn top_contributors(contributors: &[ContributorRecord], limit: usize) -> BTreeMap<String, u64> {
    let mut ranked: Vec<&ContributorRecord> = contributors.iter().collect();
    ranked.sort_by(|a, b| {
        b.contributions
            .cmp(&a.contributions)
            .then_with(|| a.login.cmp(&b.login))
    });
    ranked
        .into_iter()
        .take(limit)
        .map(|contributor| (contributor.login.clone(), contributor.contributions))
        .collect()
}

/// Additive score: active 40, bus factor 30, core 15, growth 15.
pub fn contributor_score(metrics: &ContributorMetrics) -> Score {
    let active_term = (metrics.active_contributors_30_days as f64 / 10.0 * 40.0).min(40.0);

    let bus_term = match metrics.bus_factor {
        factor if factor >= 5 => 30.0,
        factor if factor >= 3 => 20.0,
        2 => 10.0,
        _ => 5.0,
    };

    let core_term = (metrics.core_contributors as f64 / 5.0 * 15.0).min(15.0);
    let growth_term = (metrics.new_contributors_30_days as f64 / 3.0 * 15.0).min(15.0);

    clamp_score(round2(active_term + bus_term + core_term + growth_term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn commit(author: &str, days_ago: i64) -> CommitRecord {
        CommitRecord::new(author, now() - Duration::days(days_ago))
    }

    fn roster(counts: &[u64]) -> Vec<ContributorRecord> {
        counts
            .iter()
            .enumerate()
            .map(|(i, count)| ContributorRecord::new(format!("dev{i}"), *count))
            .collect()
    }

    #[test]
    fn scenario_bus_factor_is_two() {
        assert_eq!(bus_factor(&roster(&[30, 20, 15, 10, 5])), 2);
    }

    #[test]
    fn bus_factor_defaults_to_one() {
        assert_eq!(bus_factor(&[]), 1);
        assert_eq!(bus_factor(&roster(&[0, 0, 0])), 1);
        assert_eq!(bus_factor(&roster(&[100, 1, 1])), 1);
    }

    #[test]
    fn bus_factor_handles_counts_near_u64_max() {
        assert_eq!(bus_factor(&roster(&[u64::MAX, 1])), 1);
        assert_eq!(bus_factor(&roster(&[u64::MAX / 2, u64::MAX / 2, u64::MAX / 2])), 2);
    }

    #[test]
    fn flatter_distribution_never_lowers_bus_factor() {
        let skewed = bus_factor(&roster(&[60, 20, 10, 5, 5]));
        let flatter = bus_factor(&roster(&[40, 25, 15, 10, 10]));
        let flat = bus_factor(&roster(&[20, 20, 20, 20, 20]));
        assert!(skewed <= flatter);
        assert!(flatter <= flat);
        assert_eq!(flat, 3);
    }

    #[test]
    fn new_contributor_estimate_subtracts_lapsed_authors() {
        let commits = vec![
            commit("a", 1),
            commit("b", 2),
            commit("c", 3),
            commit("d", 50),
            commit("a", 60),
        ];
        let metrics = analyze_contributors(&[], &commits, now());
        assert_eq!(metrics.active_contributors_30_days, 3);
        assert_eq!(metrics.active_contributors_90_days, 4);
        assert_eq!(metrics.new_contributors_30_days, 2);
    }

    #[test]
    fn new_contributor_estimate_floors_at_zero() {
        let commits = vec![
            commit("a", 1),
            commit("b", 40),
            commit("c", 50),
            commit("d", 60),
        ];
        let metrics = analyze_contributors(&[], &commits, now());
        assert_eq!(metrics.new_contributors_30_days, 0);
    }

    #[test]
    fn distribution_keeps_top_ten_and_core_counts_threshold() {
        let counts: Vec<u64> = (1..=12).map(|n| n * 2).collect();
        let contributors = roster(&counts);
        let metrics = analyze_contributors(&contributors, &[], now());
        assert_eq!(metrics.total_contributors, 12);
        assert_eq!(metrics.contribution_distribution.len(), 10);
        assert!(!metrics.contribution_distribution.contains_key("dev0"));
        assert!(!metrics.contribution_distribution.contains_key("dev1"));
        assert_eq!(metrics.contribution_distribution.get("dev11"), Some(&24));
        // 10, 12, ..., 24
        assert_eq!(metrics.core_contributors, 8);
    }

    #[test]
    fn empty_inputs_score_only_the_bus_factor_floor() {
        let metrics = analyze_contributors(&[], &[], now());
        assert_eq!(metrics.bus_factor, 1);
        assert_eq!(metrics.score, 5.0);
    }

    #[test]
    fn healthy_project_scores_full_marks() {
        let contributors = roster(&[20, 20, 20, 20, 20, 20]);
        let mut commits: Vec<CommitRecord> =
            (0..10).map(|i| commit(&format!("dev{i}"), 2)).collect();
        commits.push(commit("dev0", 45));
        let metrics = analyze_contributors(&contributors, &commits, now());
        assert_eq!(metrics.bus_factor, 3);
        assert_eq!(metrics.new_contributors_30_days, 10);
        // 40 + 20 + 15 + 15
        assert_eq!(metrics.score, 90.0);
    }

    #[test]
    fn bus_factor_tiers() {
        let mut metrics = ContributorMetrics::default();
        for (factor, expected) in [(1, 5.0), (2, 10.0), (3, 20.0), (4, 20.0), (5, 30.0), (9, 30.0)] {
            metrics.bus_factor = factor;
            assert_eq!(contributor_score(&metrics), expected);
        }
    }
}
