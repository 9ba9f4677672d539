use crate::types::scoring::{clamp_score, round2, HealthScore, Score, ScoreWeights};
use chrono::{DateTime, Utc};

/// The four sub-scores, in the order they are weighted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub activity: Score,
    pub issue_health: Score,
    pub code_quality: Score,
    pub contributor_health: Score,
}

impl SubScores {
    pub fn new(
        activity: Score,
        issue_health: Score,
        code_quality: Score,
        contributor_health: Score,
    ) -> Self {
        Self {
            activity,
            issue_health,
            code_quality,
            contributor_health,
        }
    }

    /// Weighted sum of the sub-scores, rounded to two decimals.
    pub fn weighted_overall(&self, weights: &ScoreWeights) -> Score {
        round2(
            self.activity * weights.activity
                + self.issue_health * weights.issue_health
                + self.code_quality * weights.code_quality
                + self.contributor_health * weights.contributor_health,
        )
    }

    pub fn finalize(self, weights: &ScoreWeights, timestamp: DateTime<Utc>) -> HealthScore {
        HealthScore {
            // Weights may sum past 1.0; the reported overall stays in range.
            overall: clamp_score(self.weighted_overall(weights)),
            activity: self.activity,
            issue_health: self.issue_health,
            code_quality: self.code_quality,
            contributor_health: self.contributor_health,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn scenario_default_weights() {
        let health =
            SubScores::new(90.0, 80.0, 85.0, 87.0).finalize(&ScoreWeights::default(), stamp());
        assert!((health.overall - 85.65).abs() < 1e-9);
        assert_eq!(health.activity, 90.0);
        assert_eq!(health.contributor_health, 87.0);
        assert_eq!(health.timestamp, stamp());
    }

    #[test]
    fn overall_scales_linearly_with_sub_scores() {
        let weights = ScoreWeights::default();
        let base = SubScores::new(40.0, 30.0, 20.0, 10.0);
        let doubled = SubScores::new(80.0, 60.0, 40.0, 20.0);
        let base_overall = base.weighted_overall(&weights);
        assert!((doubled.weighted_overall(&weights) - 2.0 * base_overall).abs() < 0.02);
    }

    #[test]
    fn custom_weights_are_applied_per_key() {
        let weights = ScoreWeights {
            activity: 1.0,
            issue_health: 0.0,
            code_quality: 0.0,
            contributor_health: 0.0,
        };
        let overall = SubScores::new(42.5, 100.0, 100.0, 100.0).weighted_overall(&weights);
        assert_eq!(overall, 42.5);
    }

    #[test]
    fn oversized_weights_are_clamped_in_final_score() {
        let weights = ScoreWeights {
            activity: 1.0,
            issue_health: 1.0,
            code_quality: 1.0,
            contributor_health: 1.0,
        };
        let health = SubScores::new(100.0, 100.0, 100.0, 100.0).finalize(&weights, stamp());
        assert_eq!(health.overall, 100.0);
    }

    #[test]
    fn zero_scores_give_zero_overall() {
        let health = SubScores::new(0.0, 0.0, 0.0, 0.0).finalize(&ScoreWeights::default(), stamp());
        assert_eq!(health.overall, 0.0);
    }
}
