use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Score = f64;

pub const MAX_SCORE: Score = 100.0;

/// Rounds to two decimal places, the precision every reported score uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn clamp_score(value: f64) -> Score {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, MAX_SCORE)
}

/// Weights applied to the four sub-scores when combining them.
///
/// No sum-to-one invariant is enforced; a table that omits a key keeps the
/// default for that key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreWeights {
    #[serde(default = "default_activity_weight")]
    pub activity: f64,
    #[serde(default = "default_issue_health_weight")]
    pub issue_health: f64,
    #[serde(default = "default_code_quality_weight")]
    pub code_quality: f64,
    #[serde(default = "default_contributor_health_weight")]
    pub contributor_health: f64,
}

fn default_activity_weight() -> f64 {
    0.30
}

fn default_issue_health_weight() -> f64 {
    0.25
}

fn default_code_quality_weight() -> f64 {
    0.25
}

fn default_contributor_health_weight() -> f64 {
    0.20
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            activity: default_activity_weight(),
            issue_health: default_issue_health_weight(),
            code_quality: default_code_quality_weight(),
            contributor_health: default_contributor_health_weight(),
        }
    }
}

impl ScoreWeights {
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.activity,
            self.issue_health,
            self.code_quality,
            self.contributor_health,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

/// The four sub-scores and their weighted combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub overall: Score,
    pub activity: Score,
    pub issue_health: Score,
    pub code_quality: Score,
    pub contributor_health: Score,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl HealthRating {
    pub fn from_score(score: Score) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Fair
        } else {
            Self::NeedsAttention
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsAttention => "needs attention",
        }
    }

    /// Excellent and good pass; fair is display-only and still fails.
    pub fn is_passing(self) -> bool {
        matches!(self, Self::Excellent | Self::Good)
    }
}

impl HealthScore {
    pub fn rating(&self) -> HealthRating {
        HealthRating::from_score(self.overall)
    }
}
