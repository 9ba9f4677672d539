use crate::types::scoring::Score;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    pub commits_last_30_days: usize,
    pub commits_last_90_days: usize,
    pub prs_opened_last_30_days: usize,
    pub prs_merged_last_30_days: usize,
    pub issues_opened_last_30_days: usize,
    pub issues_closed_last_30_days: usize,
    pub active_contributors_last_30_days: usize,
    pub score: Score,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueStagnationMetrics {
    pub total_open_issues: usize,
    /// Buckets are nested: an issue stale for 180 days is counted in all three.
    pub stagnant_issues_30_days: usize,
    pub stagnant_issues_90_days: usize,
    pub stagnant_issues_180_days: usize,
    pub avg_time_to_close_days: f64,
    pub median_issue_age_days: f64,
    pub stagnant_issue_numbers: Vec<u64>,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotspotFile {
    pub file: String,
    pub changes: u64,
    pub commits: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeChurnMetrics {
    pub total_files_changed: usize,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub churn_rate: f64,
    pub files_with_high_churn: Vec<String>,
    pub avg_changes_per_commit: f64,
    pub hotspot_files: Vec<HotspotFile>,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorMetrics {
    pub total_contributors: usize,
    pub active_contributors_30_days: usize,
    pub active_contributors_90_days: usize,
    /// Heuristic estimate, see `analyze::contributors::estimate_new_contributors`.
    pub new_contributors_30_days: usize,
    pub core_contributors: usize,
    pub contribution_distribution: BTreeMap<String, u64>,
    pub bus_factor: usize,
    pub score: Score,
}

impl Default for ContributorMetrics {
    fn default() -> Self {
        Self {
            total_contributors: 0,
            active_contributors_30_days: 0,
            active_contributors_90_days: 0,
            new_contributors_30_days: 0,
            core_contributors: 0,
            contribution_distribution: BTreeMap::new(),
            bus_factor: 1,
            score: 0.0,
        }
    }
}
