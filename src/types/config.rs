use crate::error::HealthError;
use crate::report::OutputFormat;
use crate::types::scoring::ScoreWeights;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthConfig {
    pub analysis: Option<AnalysisConfig>,
    pub scoring: Option<ScoringConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    pub activity_period_days: Option<u32>,
    pub stagnation_threshold_days: Option<u32>,
    pub churn_period_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    pub weights: Option<ScoreWeights>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub save_reports: Option<bool>,
    pub reports_dir: Option<PathBuf>,
}

/// Window lengths resolved from `[analysis]`, with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub activity_period_days: u32,
    pub stagnation_threshold_days: u32,
    pub churn_period_days: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            activity_period_days: 90,
            stagnation_threshold_days: 90,
            churn_period_days: 90,
        }
    }
}

/// Stagnation thresholds whose issue numbers can be listed in a report.
pub const STAGNATION_BUCKETS: [u32; 3] = [30, 90, 180];

/// Upper bound for any `[analysis]` window, roughly a century.
pub const MAX_PERIOD_DAYS: u32 = 36_500;

pub const DEFAULT_REPORTS_DIR: &str = "reports";

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"[analysis]
activity_period_days = 90
stagnation_threshold_days = 90
churn_period_days = 90

[scoring.weights]
activity = 0.30
issue_health = 0.25
code_quality = 0.25
contributor_health = 0.20

[output]
format = "json"
save_reports = false
reports_dir = "reports"
"#;

impl HealthConfig {
    pub fn weights(&self) -> ScoreWeights {
        self.scoring
            .as_ref()
            .and_then(|scoring| scoring.weights)
            .unwrap_or_default()
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        let defaults = AnalysisSettings::default();
        match &self.analysis {
            Some(analysis) => AnalysisSettings {
                activity_period_days: analysis
                    .activity_period_days
                    .unwrap_or(defaults.activity_period_days),
                stagnation_threshold_days: analysis
                    .stagnation_threshold_days
                    .unwrap_or(defaults.stagnation_threshold_days),
                churn_period_days: analysis
                    .churn_period_days
                    .unwrap_or(defaults.churn_period_days),
            },
            None => defaults,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|output| output.format)
            .unwrap_or(OutputFormat::Json)
    }

    pub fn save_reports(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|output| output.save_reports)
            .unwrap_or(false)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.output
            .as_ref()
            .and_then(|output| output.reports_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORTS_DIR))
    }

    pub fn validate(&self) -> Result<(), HealthError> {
        let weights = self.weights();
        for (key, weight) in [
            ("activity", weights.activity),
            ("issue_health", weights.issue_health),
            ("code_quality", weights.code_quality),
            ("contributor_health", weights.contributor_health),
        ] {
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(HealthError::ConfigParse(format!(
                    "scoring.weights.{key} must be between 0.0 and 1.0 (found {weight})"
                )));
            }
        }

        let settings = self.analysis_settings();
        for (key, days) in [
            ("activity_period_days", settings.activity_period_days),
            ("churn_period_days", settings.churn_period_days),
        ] {
            if !(1..=MAX_PERIOD_DAYS).contains(&days) {
                return Err(HealthError::ConfigParse(format!(
                    "analysis.{key} must be between 1 and {MAX_PERIOD_DAYS} (found {days})"
                )));
            }
        }
        if !STAGNATION_BUCKETS.contains(&settings.stagnation_threshold_days) {
            return Err(HealthError::ConfigParse(format!(
                "analysis.stagnation_threshold_days must be one of 30, 90 or 180 (found {})",
                settings.stagnation_threshold_days
            )));
        }

        if self.reports_dir().as_os_str().is_empty() {
            return Err(HealthError::ConfigParse(
                "output.reports_dir cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
