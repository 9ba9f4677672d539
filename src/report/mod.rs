pub mod json;
pub mod md;
pub mod text;
pub mod writer;

use crate::error::HealthError;
use crate::types::report::AnalysisReport;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
    Md,
}

pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String, HealthError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(HealthError::Json),
        OutputFormat::Text => Ok(text::to_text(report)),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
