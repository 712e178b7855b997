mod cli;
mod client;
mod commands;
mod config;
mod error;
mod output;
mod responses;
#[cfg(test)]
mod test_server;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::GitHubClient;
use config::Config;
use error::{PlannerError, Result};
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        // Conventional exit status for an interrupted process
        let code = if matches!(e, PlannerError::Cancelled) { 130 } else { 1 };
        std::process::exit(code);
    }
}

/// Logs go to stderr so JSON output on stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("warn,planner=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// Returns a CancellationToken which is cancelled on Ctrl-C.
fn shutdown_signal_handler() -> CancellationToken {
    let cancel_token = CancellationToken::new();

    tokio::spawn({
        let cancel_token = cancel_token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C. Cancelling.");
                cancel_token.cancel();
            }
        }
    });

    cancel_token
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    output::set_json_output(cli.json);

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "planner", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Issues(args) => {
            let config = Config::load()?;
            let token = config.token()?;
            let client = match &config.endpoint {
                Some(endpoint) => {
                    GitHubClient::with_endpoint(reqwest::Client::new(), token, endpoint)
                }
                None => GitHubClient::new(reqwest::Client::new(), token),
            };
            let cancel = shutdown_signal_handler();

            commands::issues::list(&client, &config, args, &cancel).await?;
        }
    }

    Ok(())
}
