mod cli;
mod logging;

use chrono::Utc;
use clap::Parser;
use repohealth::analyze::{activity, churn, contributors, stagnation};
use repohealth::config::{self, DEFAULT_CONFIG_FILE};
use repohealth::error::{HealthError, Result};
use repohealth::report::{self, writer, OutputFormat};
use repohealth::source::{RepositoryData, SnapshotSource};
use repohealth::types::config::DEFAULT_CONFIG_TEMPLATE;
use repohealth::types::records::RepositoryId;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const NEEDS_ATTENTION: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

/// Config layers are discovered next to the snapshot file.
fn config_root(snapshot: &Path) -> PathBuf {
    snapshot
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn resolve_repository(flag: Option<&str>, source: &SnapshotSource) -> Result<RepositoryId> {
    match flag {
        Some(value) => value.parse(),
        None => source
            .repository()?
            .ok_or_else(|| HealthError::InvalidRepository("<missing>".to_string())),
    }
}

fn run_analyze(cmd: cli::AnalyzeCommand) -> Result<i32> {
    let source = SnapshotSource::load(&cmd.snapshot)?;
    let repository = resolve_repository(cmd.repo.as_deref(), &source)?;
    let cfg = config::load_config(&config_root(&cmd.snapshot), cmd.config.as_deref())?;

    let now = Utc::now();
    let data = RepositoryData::collect(&source, now, &cfg.analysis_settings())?;
    let analysis = repohealth::analyze_at(repository, &data, &cfg, now);

    let format = match cmd.format {
        Some(cli::ReportFormat::Json) => OutputFormat::Json,
        Some(cli::ReportFormat::Text) => OutputFormat::Text,
        Some(cli::ReportFormat::Md) => OutputFormat::Md,
        None => cfg.output_format(),
    };
    let rendered = report::render(&analysis, format)?;
    match &cmd.output {
        Some(path) => {
            writer::write_output(path, &rendered)?;
            eprintln!("report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if cmd.save_report || cfg.save_reports() {
        let path = writer::save_report(&cfg.reports_dir(), &analysis)?;
        eprintln!("detailed report saved to {}", path.display());
    }

    let rating = analysis.health_score.rating();
    if rating.is_passing() {
        Ok(exit_code::SUCCESS)
    } else {
        warn!(
            overall = analysis.health_score.overall,
            rating = rating.label(),
            "repository health below passing threshold"
        );
        Ok(exit_code::NEEDS_ATTENTION)
    }
}

fn run_score(cmd: cli::ScoreCommand) -> Result<i32> {
    let source = SnapshotSource::load(&cmd.snapshot)?;
    let cfg = config::load_config(&config_root(&cmd.snapshot), cmd.config.as_deref())?;
    let settings = cfg.analysis_settings();

    let now = Utc::now();
    let data = RepositoryData::collect(&source, now, &settings)?;
    info!(component = ?cmd.component, "scoring single component");

    let rendered = match cmd.component {
        cli::Component::Activity => serde_json::to_string_pretty(&activity::analyze_activity(
            &data.commits,
            &data.pull_requests,
            &data.issues,
            now,
        ))?,
        cli::Component::Issues => serde_json::to_string_pretty(&stagnation::analyze_stagnation(
            &data.issues,
            now,
            settings.stagnation_threshold_days,
        ))?,
        cli::Component::Churn => serde_json::to_string_pretty(&churn::analyze_churn(
            &data.commits,
            now,
            settings.churn_period_days,
        ))?,
        cli::Component::Contributors => {
            serde_json::to_string_pretty(&contributors::analyze_contributors(
                &data.contributors,
                &data.commits,
                now,
            ))?
        }
    };
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn run_init(cmd: cli::InitCommand) -> Result<i32> {
    if !cmd.path.exists() {
        return Err(HealthError::PathNotFound(cmd.path.display().to_string()));
    }
    let target = cmd.path.join(DEFAULT_CONFIG_FILE);
    if target.exists() && !cmd.force {
        return Err(HealthError::AlreadyExists(target.display().to_string()));
    }
    std::fs::write(&target, DEFAULT_CONFIG_TEMPLATE)?;
    println!("wrote {}", target.display());
    Ok(exit_code::SUCCESS)
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    match cli.command {
        cli::Commands::Analyze(cmd) => run_analyze(cmd),
        cli::Commands::Score(cmd) => run_score(cmd),
        cli::Commands::Init(cmd) => run_init(cmd),
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
