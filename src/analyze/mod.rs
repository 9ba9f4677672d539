pub mod activity;
pub mod aggregate;
pub mod churn;
pub mod contributors;
pub mod stagnation;

use crate::source::RepositoryData;
use crate::types::config::HealthConfig;
use crate::types::records::{CommitRecord, RepositoryId};
use crate::types::report::AnalysisReport;
use aggregate::SubScores;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

/// A trailing window ending at the analysis instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: DateTime<Utc>,
}

impl Window {
    /// Saturates at the earliest representable instant.
    pub fn days_before(now: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: now
                .checked_sub_signed(Duration::days(i64::from(days)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start
    }

    pub fn contains_commit(&self, commit: &CommitRecord) -> bool {
        commit.authored_at.map_or(true, |at| self.contains(at))
    }
}

/// Whole days elapsed from `from` to `to`, rounded down.
pub fn whole_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(86_400)
}

pub fn analyze(
    repository: RepositoryId,
    data: &RepositoryData,
    config: &HealthConfig,
) -> AnalysisReport {
    analyze_at(repository, data, config, Utc::now())
}

/// Runs all four scorers against one shared `now` and combines them.
pub fn analyze_at(
    repository: RepositoryId,
    data: &RepositoryData,
    config: &HealthConfig,
    now: DateTime<Utc>,
) -> AnalysisReport {
    let settings = config.analysis_settings();
    let weights = config.weights();
    if (weights.sum() - 1.0).abs() > 0.001 {
        warn!(sum = weights.sum(), "scoring weights do not sum to 1.0");
    }

    info!(%repository, "analyzing repository activity");
    let activity_metrics =
        activity::analyze_activity(&data.commits, &data.pull_requests, &data.issues, now);

    info!(%repository, "detecting issue stagnation");
    let issue_metrics =
        stagnation::analyze_stagnation(&data.issues, now, settings.stagnation_threshold_days);

    info!(%repository, days = settings.churn_period_days, "analyzing code churn");
    let churn_metrics = churn::analyze_churn(&data.commits, now, settings.churn_period_days);

    info!(%repository, "analyzing contributor patterns");
    let contributor_metrics =
        contributors::analyze_contributors(&data.contributors, &data.commits, now);

    let health_score = SubScores::new(
        activity_metrics.score,
        issue_metrics.score,
        churn_metrics.score,
        contributor_metrics.score,
    )
    .finalize(&weights, now);
    info!(%repository, overall = health_score.overall, "analysis complete");

    AnalysisReport {
        repository,
        health_score,
        activity_metrics,
        issue_metrics,
        churn_metrics,
        contributor_metrics,
        analyzed_at: now,
    }
}
