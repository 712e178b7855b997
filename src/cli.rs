use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "planner")]
#[command(about = "List open issues on a GitHub project board", version)]
#[command(after_help = "EXAMPLES:
    planner issues --owner acme --project 7          Issues updated in the last year
    planner issues --since 2023-01-01                Issues updated since a date
    planner issues --days 14 --json                  Last two weeks as JSON")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List open issues on a project board
    #[command(after_help = "EXAMPLES:
    planner issues --owner acme --project 7
    planner issues --since 2023-01-01T00:00:00Z
    planner issues --days 30")]
    Issues(IssuesArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    planner completions bash > ~/.bash_completion.d/planner
    planner completions zsh > ~/.zfunc/_planner")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Args, Clone, Debug)]
pub struct IssuesArgs {
    /// Owner of the project board (user or organization)
    #[arg(long)]
    pub owner: Option<String>,

    /// Project board number
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    pub project: Option<u32>,

    /// Only issues updated at or after this instant (RFC 3339 or YYYY-MM-DD)
    #[arg(long, conflicts_with = "days")]
    pub since: Option<String>,

    /// Only issues updated within this many days (default from config, else 365)
    #[arg(long)]
    pub days: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_issues_command() {
        let cli = Cli::try_parse_from([
            "planner", "issues", "--owner", "acme", "-p", "7", "--since", "2023-01-01", "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Issues(args) => {
                assert_eq!(args.owner.as_deref(), Some("acme"));
                assert_eq!(args.project, Some(7));
                assert_eq!(args.since.as_deref(), Some("2023-01-01"));
            }
            _ => panic!("expected issues command"),
        }
    }

    #[test]
    fn test_since_conflicts_with_days() {
        assert!(Cli::try_parse_from([
            "planner", "issues", "--since", "2023-01-01", "--days", "3"
        ])
        .is_err());
    }

    #[test]
    fn test_project_must_be_positive() {
        assert!(Cli::try_parse_from(["planner", "issues", "--project", "0"]).is_err());
    }
}
