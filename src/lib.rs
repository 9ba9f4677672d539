//! Repository health scoring.
//!
//! Raw commit, issue, pull request and contributor records are turned into
//! four 0-100 sub-scores (activity, issue health, code quality, contributor
//! health) and one weighted overall score. The scorers are pure functions of
//! their inputs and an explicit `now`, so they can run in any order or in
//! parallel; only [`analyze::aggregate`] depends on the other four.

pub mod analyze;
pub mod config;
pub mod error;
pub mod report;
pub mod source;
pub mod types;

pub use analyze::{analyze, analyze_at};
pub use error::{HealthError, Result};
pub use source::{RepositoryData, RepositoryDataSource, SnapshotSource, StateFilter};
pub use types::report::AnalysisReport;
pub use types::scoring::{HealthScore, ScoreWeights};
