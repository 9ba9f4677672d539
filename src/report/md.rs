use crate::types::report::AnalysisReport;

pub fn to_markdown(report: &AnalysisReport) -> String {
    let health = &report.health_score;
    let mut output = String::new();
    output.push_str(&format!("# Repository Health: {}\n\n", report.repository));
    output.push_str(&format!(
        "Overall score: {:.2} ({})\n\n",
        health.overall,
        health.rating().label()
    ));

    output.push_str("## Component Scores\n\n");
    output.push_str(&format!(
        "- activity: {:.2}\n- issue_health: {:.2}\n- code_quality: {:.2}\n- contributor_health: {:.2}\n\n",
        health.activity, health.issue_health, health.code_quality, health.contributor_health
    ));

    let activity = &report.activity_metrics;
    output.push_str("## Activity (last 30 days)\n\n");
    output.push_str(&format!(
        "- commits: {} ({} in 90 days)\n- pull requests: {} opened, {} merged\n- issues: {} opened, {} closed\n- active contributors: {}\n\n",
        activity.commits_last_30_days,
        activity.commits_last_90_days,
        activity.prs_opened_last_30_days,
        activity.prs_merged_last_30_days,
        activity.issues_opened_last_30_days,
        activity.issues_closed_last_30_days,
        activity.active_contributors_last_30_days
    ));

    let issues = &report.issue_metrics;
    output.push_str("## Issue Health\n\n");
    output.push_str(&format!(
        "- open issues: {}\n- stagnant: {} (30d), {} (90d), {} (180d)\n- average time to close: {:.1} days\n- median open issue age: {:.1} days\n",
        issues.total_open_issues,
        issues.stagnant_issues_30_days,
        issues.stagnant_issues_90_days,
        issues.stagnant_issues_180_days,
        issues.avg_time_to_close_days,
        issues.median_issue_age_days
    ));
    if issues.stagnant_issue_numbers.is_empty() {
        output.push_str("- stagnant issue numbers: none\n\n");
    } else {
        let numbers = issues
            .stagnant_issue_numbers
            .iter()
            .map(|number| format!("#{number}"))
            .collect::<Vec<_>>();
        output.push_str(&format!("- stagnant issue numbers: {}\n\n", numbers.join(", ")));
    }

    let churn = &report.churn_metrics;
    output.push_str("## Code Churn\n\n");
    output.push_str(&format!(
        "- files changed: {}\n- lines: +{} / -{}\n- average changes per commit: {:.1}\n\n",
        churn.total_files_changed,
        churn.total_additions,
        churn.total_deletions,
        churn.avg_changes_per_commit
    ));
    output.push_str("### Hotspots\n\n");
    if churn.hotspot_files.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for hotspot in &churn.hotspot_files {
            output.push_str(&format!(
                "- `{}`: {} commits, {} lines changed\n",
                hotspot.file, hotspot.commits, hotspot.changes
            ));
        }
        output.push('\n');
    }

    let contributors = &report.contributor_metrics;
    output.push_str("## Contributors\n\n");
    output.push_str(&format!(
        "- total: {}\n- active: {} (30d), {} (90d)\n- new (30d, estimate): {}\n- core: {}\n- bus factor: {}\n",
        contributors.total_contributors,
        contributors.active_contributors_30_days,
        contributors.active_contributors_90_days,
        contributors.new_contributors_30_days,
        contributors.core_contributors,
        contributors.bus_factor
    ));

    output
}
