use crate::types::report::AnalysisReport;

const RULE_WIDTH: usize = 70;

pub fn to_text(report: &AnalysisReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let health = &report.health_score;
    let mut output = String::new();

    output.push_str(&format!(
        "{rule}\nRepository Health Analysis: {}\n{rule}\n\n",
        report.repository
    ));
    output.push_str(&format!(
        "OVERALL HEALTH SCORE: {}/100 ({})\n\n",
        health.overall,
        health.rating().label()
    ));

    output.push_str("Component Scores:\n");
    output.push_str(&format!(
        "  - Activity:            {}/100\n  - Issue Health:        {}/100\n  - Code Quality:        {}/100\n  - Contributor Health:  {}/100\n\n",
        health.activity, health.issue_health, health.code_quality, health.contributor_health
    ));

    let activity = &report.activity_metrics;
    output.push_str("Repository Activity (Last 30 days):\n");
    output.push_str(&format!(
        "  - Commits:             {}\n  - PRs Opened:          {}\n  - PRs Merged:          {}\n  - Issues Opened:       {}\n  - Issues Closed:       {}\n  - Active Contributors: {}\n\n",
        activity.commits_last_30_days,
        activity.prs_opened_last_30_days,
        activity.prs_merged_last_30_days,
        activity.issues_opened_last_30_days,
        activity.issues_closed_last_30_days,
        activity.active_contributors_last_30_days
    ));

    let issues = &report.issue_metrics;
    output.push_str("Issue Health:\n");
    output.push_str(&format!(
        "  - Total Open Issues:   {}\n  - Stagnant (30d):      {}\n  - Stagnant (90d):      {}\n  - Stagnant (180d):     {}\n  - Avg Time to Close:   {:.1} days\n  - Median Issue Age:    {:.1} days\n\n",
        issues.total_open_issues,
        issues.stagnant_issues_30_days,
        issues.stagnant_issues_90_days,
        issues.stagnant_issues_180_days,
        issues.avg_time_to_close_days,
        issues.median_issue_age_days
    ));

    let contributors = &report.contributor_metrics;
    output.push_str("Contributor Health:\n");
    output.push_str(&format!(
        "  - Total Contributors:  {}\n  - Active (30d):        {}\n  - New (30d, est.):     {}\n  - Core Contributors:   {}\n  - Bus Factor:          {}\n\n",
        contributors.total_contributors,
        contributors.active_contributors_30_days,
        contributors.new_contributors_30_days,
        contributors.core_contributors,
        contributors.bus_factor
    ));

    let churn = &report.churn_metrics;
    output.push_str("Code Churn:\n");
    output.push_str(&format!(
        "  - Files Changed:       {}\n  - Lines Added:         {}\n  - Lines Deleted:       {}\n  - Avg Changes/Commit:  {:.1}\n  - High Churn Files:    {}\n\n",
        churn.total_files_changed,
        churn.total_additions,
        churn.total_deletions,
        churn.avg_changes_per_commit,
        churn.files_with_high_churn.len()
    ));

    output.push_str(&format!(
        "{rule}\nReport generated: {}\n{rule}",
        report.analyzed_at.format("%Y-%m-%d %H:%M:%S")
    ));
    output
}
