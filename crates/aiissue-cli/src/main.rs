mod action_output;
mod bootstrap_helpers;
mod cli_args;
mod credentials;
mod run;

use std::process::ExitCode;

use aiissue_core::AiIssueError;
use clap::Parser;
use tracing::{error, info};

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;
use crate::run::{run_action, RunOutcome};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(parse_error) if parse_error.exit_code() == 0 => parse_error.exit(),
        Err(parse_error) => {
            let _ = parse_error.print();
            error!(kind = "configuration_error", "invalid command line or environment");
            return ExitCode::from(AiIssueError::EXIT_FAILURE);
        }
    };

    match run_action(&cli).await {
        Ok(RunOutcome::Skipped { reason }) => {
            info!(%reason, "nothing to do");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Created(report)) => {
            info!(
                issue_number = report.issue_number,
                issue_url = %report.issue_url,
                "done"
            );
            ExitCode::SUCCESS
        }
        Err(failure) => {
            let typed = failure.downcast_ref::<AiIssueError>();
            let kind = typed.map(AiIssueError::kind).unwrap_or("internal_error");
            error!(kind, "{failure:#}");
            ExitCode::from(AiIssueError::EXIT_FAILURE)
        }
    }
}
