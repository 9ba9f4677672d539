pub mod snapshot;

use crate::analyze::Window;
use crate::error::Result;
use crate::types::config::AnalysisSettings;
use crate::types::records::{CommitRecord, ContributorRecord, IssueRecord, PullRequestRecord};
use chrono::{DateTime, Utc};
use tracing::info;

pub use snapshot::SnapshotSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

/// Read side of a hosted repository. Pagination, retries, rate limits and
/// authentication belong to implementations; callers only see collections.
pub trait RepositoryDataSource {
    fn fetch_commits(&self, since: DateTime<Utc>) -> Result<Vec<CommitRecord>>;

    fn fetch_issues(
        &self,
        state: StateFilter,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<IssueRecord>>;

    fn fetch_pull_requests(&self, state: StateFilter) -> Result<Vec<PullRequestRecord>>;

    fn fetch_contributors(&self) -> Result<Vec<ContributorRecord>>;
}

/// Plain collections handed to the scorers.
#[derive(Debug, Clone, Default)]
pub struct RepositoryData {
    pub commits: Vec<CommitRecord>,
    pub issues: Vec<IssueRecord>,
    pub pull_requests: Vec<PullRequestRecord>,
    pub contributors: Vec<ContributorRecord>,
}

impl RepositoryData {
    /// Fetches everything one analysis needs in a single pass. Commits reach
    /// back to the widest window any scorer uses.
    pub fn collect<S: RepositoryDataSource + ?Sized>(
        source: &S,
        now: DateTime<Utc>,
        settings: &AnalysisSettings,
    ) -> Result<Self> {
        let horizon_days = settings
            .churn_period_days
            .max(settings.activity_period_days)
            .max(90);
        let since = Window::days_before(now, horizon_days).start();

        let data = Self {
            commits: source.fetch_commits(since)?,
            issues: source.fetch_issues(StateFilter::All, None)?,
            pull_requests: source.fetch_pull_requests(StateFilter::All)?,
            contributors: source.fetch_contributors()?,
        };
        info!(
            commits = data.commits.len(),
            issues = data.issues.len(),
            pull_requests = data.pull_requests.len(),
            contributors = data.contributors.len(),
            "repository data collected"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::records::IssueState;
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSource {
        commit_since: RefCell<Option<DateTime<Utc>>>,
    }

    impl RepositoryDataSource for RecordingSource {
        fn fetch_commits(&self, since: DateTime<Utc>) -> Result<Vec<CommitRecord>> {
            *self.commit_since.borrow_mut() = Some(since);
            Ok(vec![CommitRecord::new("a@x.io", since)])
        }

        fn fetch_issues(
            &self,
            _state: StateFilter,
            _since: Option<DateTime<Utc>>,
        ) -> Result<Vec<IssueRecord>> {
            Ok(vec![])
        }

        fn fetch_pull_requests(&self, _state: StateFilter) -> Result<Vec<PullRequestRecord>> {
            Ok(vec![PullRequestRecord {
                number: 1,
                state: IssueState::Open,
                created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                merged_at: None,
            }])
        }

        fn fetch_contributors(&self) -> Result<Vec<ContributorRecord>> {
            Ok(vec![ContributorRecord::new("a", 3)])
        }
    }

    #[test]
    fn collect_reaches_back_to_widest_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let source = RecordingSource::default();
        let settings = AnalysisSettings {
            churn_period_days: 120,
            ..AnalysisSettings::default()
        };

        let data = RepositoryData::collect(&source, now, &settings).expect("collect should work");
        assert_eq!(data.commits.len(), 1);
        assert_eq!(data.pull_requests.len(), 1);
        assert_eq!(data.contributors.len(), 1);
        assert_eq!(
            *source.commit_since.borrow(),
            Some(now - Duration::days(120))
        );
    }

    #[test]
    fn collect_never_fetches_less_than_ninety_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let source = RecordingSource::default();
        let settings = AnalysisSettings {
            activity_period_days: 30,
            churn_period_days: 14,
            ..AnalysisSettings::default()
        };

        RepositoryData::collect(&source, now, &settings).expect("collect should work");
        assert_eq!(*source.commit_since.borrow(), Some(now - Duration::days(90)));
    }

    #[test]
    fn collect_saturates_oversized_activity_window() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let source = RecordingSource::default();
        let settings = AnalysisSettings {
            activity_period_days: u32::MAX,
            ..AnalysisSettings::default()
        };

        RepositoryData::collect(&source, now, &settings).expect("collect should work");
        assert_eq!(*source.commit_since.borrow(), Some(DateTime::<Utc>::MIN_UTC));
    }
}
