use super::{RepositoryDataSource, StateFilter};
use crate::error::{HealthError, Result};
use crate::types::records::{
    CommitRecord, CommitStats, ContributorRecord, FileChange, IssueRecord, IssueState,
    PullRequestRecord, RepositoryId, UNKNOWN_AUTHOR,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Raw platform API payloads captured to a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    pub repository: Option<String>,
    #[serde(default)]
    pub commits: Vec<RawCommit>,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
    #[serde(default)]
    pub pull_requests: Vec<RawPullRequest>,
    #[serde(default)]
    pub contributors: Vec<RawContributor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommit {
    pub sha: Option<String>,
    #[serde(default)]
    pub commit: RawCommitDetail,
    pub stats: Option<RawStats>,
    pub files: Option<Vec<RawFile>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommitDetail {
    pub author: Option<RawAuthor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStats {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    pub filename: String,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub number: u64,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Present when the issues endpoint returned a pull request.
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPullRequest {
    pub number: u64,
    pub state: IssueState,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawContributor {
    pub login: String,
    #[serde(default)]
    pub contributions: u64,
}

impl From<&RawCommit> for CommitRecord {
    fn from(raw: &RawCommit) -> Self {
        let author = raw.commit.author.as_ref();
        Self {
            author: author
                .and_then(|author| author.email.clone())
                .filter(|email| !email.is_empty())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            authored_at: author.and_then(|author| author.date),
            stats: raw.stats.as_ref().map(|stats| CommitStats {
                additions: stats.additions,
                deletions: stats.deletions,
            }),
            files: raw.files.as_ref().map(|files| {
                files
                    .iter()
                    .map(|file| FileChange {
                        filename: file.filename.clone(),
                        additions: file.additions,
                        deletions: file.deletions,
                    })
                    .collect()
            }),
        }
    }
}

impl From<&RawIssue> for IssueRecord {
    fn from(raw: &RawIssue) -> Self {
        Self {
            number: raw.number,
            state: raw.state,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            closed_at: raw.closed_at,
        }
    }
}

impl From<&RawPullRequest> for PullRequestRecord {
    fn from(raw: &RawPullRequest) -> Self {
        Self {
            number: raw.number,
            state: raw.state,
            created_at: raw.created_at,
            merged_at: raw.merged_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)
            .map_err(|e| HealthError::SnapshotParse(e.to_string()))?;
        Ok(Self::new(snapshot))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HealthError::PathNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)
            .map_err(|e| HealthError::SnapshotParse(format!("{}: {}", path.display(), e)))?;
        debug!(
            path = %path.display(),
            commits = snapshot.commits.len(),
            issues = snapshot.issues.len(),
            "snapshot loaded"
        );
        Ok(Self::new(snapshot))
    }

    /// Repository identifier recorded in the snapshot, if any.
    pub fn repository(&self) -> Result<Option<RepositoryId>> {
        self.snapshot
            .repository
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}

fn matches_state(state: IssueState, filter: StateFilter) -> bool {
    match filter {
        StateFilter::All => true,
        StateFilter::Open => state == IssueState::Open,
        StateFilter::Closed => state == IssueState::Closed,
    }
}

impl RepositoryDataSource for SnapshotSource {
    fn fetch_commits(&self, since: DateTime<Utc>) -> Result<Vec<CommitRecord>> {
        Ok(self
            .snapshot
            .commits
            .iter()
            .map(CommitRecord::from)
            .filter(|commit| commit.authored_at.map_or(true, |at| at >= since))
            .collect())
    }

    fn fetch_issues(
        &self,
        state: StateFilter,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<IssueRecord>> {
        Ok(self
            .snapshot
            .issues
            .iter()
            .filter(|issue| issue.pull_request.is_none())
            .filter(|issue| matches_state(issue.state, state))
            .filter(|issue| since.map_or(true, |since| issue.updated_at >= since))
            .map(IssueRecord::from)
            .collect())
    }

    fn fetch_pull_requests(&self, state: StateFilter) -> Result<Vec<PullRequestRecord>> {
        Ok(self
            .snapshot
            .pull_requests
            .iter()
            .filter(|pr| matches_state(pr.state, state))
            .map(PullRequestRecord::from)
            .collect())
    }

    fn fetch_contributors(&self) -> Result<Vec<ContributorRecord>> {
        Ok(self
            .snapshot
            .contributors
            .iter()
            .map(|raw| ContributorRecord::new(raw.login.clone(), raw.contributions))
            .collect())
    }
}
