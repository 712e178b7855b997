use chrono::{DateTime, Duration, NaiveDate, Utc};
use colored::Colorize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use crate::cli::IssuesArgs;
use crate::client::GitHubClient;
use crate::config::Config;
use crate::error::{PlannerError, Result};
use crate::output::{self, format_date_only, format_relative, truncate};
use crate::types::IssueRecord;

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    number: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&IssueRecord> for IssueRow {
    fn from(issue: &IssueRecord) -> Self {
        Self {
            number: format!("#{}", issue.number).bold().to_string(),
            title: truncate(&issue.title, 60),
            updated: format_relative(&issue.updated_at),
        }
    }
}

/// Parse `--since` as RFC 3339, or as a bare date at midnight UTC.
pub fn parse_since(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| PlannerError::InvalidSince(value.to_string()))
}

fn resolve_since(args: &IssuesArgs, config: &Config, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    match &args.since {
        Some(value) => parse_since(value),
        None => {
            let days = args.days.unwrap_or_else(|| config.since_days());
            Ok(now - Duration::days(i64::from(days)))
        }
    }
}

pub async fn list(
    client: &GitHubClient,
    config: &Config,
    args: IssuesArgs,
    cancel: &CancellationToken,
) -> Result<()> {
    let owner = config.resolve_owner(args.owner.as_deref())?;
    let project_number = config.resolve_project(args.project)?;
    let since = resolve_since(&args, config, Utc::now())?;

    let issues = client
        .fetch_issues(&owner, project_number, since, cancel)
        .await?;

    output::print_message(&format!(
        "Found {} issues in project {}/{} updated since {}:",
        issues.len(),
        owner,
        project_number,
        format_date_only(&since)
    ));

    if issues.is_empty() && !output::is_json_output() {
        return Ok(());
    }

    output::print_table(&issues, |issue| IssueRow::from(issue));

    Ok(())
}
