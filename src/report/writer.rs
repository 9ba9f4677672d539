use crate::error::{HealthError, Result};
use crate::report::json;
use crate::types::report::AnalysisReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn report_file_name(report: &AnalysisReport) -> String {
    let stamp = report.analyzed_at.format("%Y%m%d_%H%M%S");
    format!(
        "{}_{}_{stamp}.json",
        report.repository.owner, report.repository.name
    )
}

/// Writes the JSON report under `dir`, creating it when missing.
pub fn save_report(dir: &Path, report: &AnalysisReport) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(HealthError::Io)?;
    let out_path = dir.join(report_file_name(report));
    let json = json::to_json(report)?;
    fs::write(&out_path, json).map_err(HealthError::Io)?;
    info!(path = %out_path.display(), "report saved");
    Ok(out_path)
}

pub fn write_output(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, rendered)?;
    Ok(())
}
