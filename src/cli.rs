use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repohealth",
    version,
    about = "Repository health scoring from activity, issues, churn and contributors"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every dimension and print the full report
    Analyze(AnalyzeCommand),
    /// Score a single dimension and print its metrics as JSON
    Score(ScoreCommand),
    /// Write a default repohealth.toml
    Init(InitCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// JSON snapshot of repository API data
    pub snapshot: PathBuf,
    /// Repository identifier (owner/repo), overriding the snapshot's
    #[arg(long)]
    pub repo: Option<String>,
    /// Configuration file applied after the discovered layers
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    /// Write the rendered report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Also save the JSON report under the configured reports directory
    #[arg(long)]
    pub save_report: bool,
}

#[derive(Args)]
pub struct ScoreCommand {
    #[arg(value_enum)]
    pub component: Component,
    pub snapshot: PathBuf,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct InitCommand {
    #[arg(default_value = ".")]
    pub path: PathBuf,
    /// Replace an existing repohealth.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Text,
    Md,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Component {
    Activity,
    Issues,
    Churn,
    Contributors,
}
