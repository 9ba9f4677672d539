use crate::types::metrics::{
    ActivityMetrics, CodeChurnMetrics, ContributorMetrics, IssueStagnationMetrics,
};
use crate::types::records::RepositoryId;
use crate::types::scoring::HealthScore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub repository: RepositoryId,
    pub health_score: HealthScore,
    pub activity_metrics: ActivityMetrics,
    pub issue_metrics: IssueStagnationMetrics,
    pub churn_metrics: CodeChurnMetrics,
    pub contributor_metrics: ContributorMetrics,
    pub analyzed_at: DateTime<Utc>,
}
