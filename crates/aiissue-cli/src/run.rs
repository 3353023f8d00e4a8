use std::sync::Arc;

use aiissue_ai::{OpenAiClient, OpenAiConfig};
use aiissue_core::{
    decide_trigger, AiIssueError, IssueGenerator, IssueGeneratorConfig, IssuePipeline,
    PipelineReport, TriggerDecision,
};
use aiissue_github::{read_trigger_event, GithubApiClient, GithubApiClientConfig};
use anyhow::Result;
use tracing::info;

use crate::action_output::write_action_outputs;
use crate::cli_args::Cli;
use crate::credentials::resolve_credentials;

#[derive(Debug)]
pub(crate) enum RunOutcome {
    Skipped { reason: String },
    Created(PipelineReport),
}

pub(crate) async fn run_action(cli: &Cli) -> Result<RunOutcome> {
    let event_path = cli
        .event_path
        .as_deref()
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or_else(|| {
            AiIssueError::Configuration("GITHUB_EVENT_PATH is not set".to_string())
        })?;

    let event = match decide_trigger(read_trigger_event(event_path))? {
        TriggerDecision::Skip { reason } => return Ok(RunOutcome::Skipped { reason }),
        TriggerDecision::Proceed(event) => event,
    };
    info!(
        repository = %event.repository,
        pr_number = event.pr_number,
        "trigger phrase found"
    );

    let credentials = resolve_credentials(cli, |name| std::env::var(name).ok())?;

    let github = GithubApiClient::new(
        GithubApiClientConfig {
            api_base: cli.github_api_base.clone(),
            token: credentials.github_token,
            request_timeout_ms: cli.request_timeout_ms,
        },
        event.repository.clone(),
    )
    .map_err(AiIssueError::from)?;
    let model_client = OpenAiClient::new(OpenAiConfig {
        api_base: cli.openai_api_base.clone(),
        api_key: credentials.openai_api_key,
        organization: cli
            .openai_organization
            .clone()
            .filter(|organization| !organization.trim().is_empty()),
        request_timeout_ms: cli.request_timeout_ms,
    })
    .map_err(AiIssueError::from)?;
    let generator = IssueGenerator::new(
        Arc::new(model_client),
        IssueGeneratorConfig {
            model: cli.model.clone(),
            temperature: Some(cli.temperature),
        },
    );

    let pipeline = IssuePipeline::new(github, generator, cli.github_server_url.clone());
    let report = pipeline.run(event.pr_number).await?;

    let output_file = cli
        .github_output
        .as_deref()
        .filter(|path| !path.as_os_str().is_empty());
    write_action_outputs(
        output_file,
        &[
            ("issue_number", report.issue_number.to_string()),
            ("issue_url", report.issue_url.clone()),
        ],
        &mut std::io::stdout().lock(),
    )?;

    Ok(RunOutcome::Created(report))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{run_action, RunOutcome};
    use crate::cli_args::Cli;

    fn cli_for(event_path: &std::path::Path) -> Cli {
        Cli::try_parse_from([
            "aiissue",
            "--event-path",
            event_path.to_str().expect("utf8 path"),
            "--github-token",
            "gh-test",
            "--openai-api-key",
            "sk-test",
            "--github-api-base",
            "http://127.0.0.1:9",
            "--openai-api-base",
            "http://127.0.0.1:9",
        ])
        .expect("cli should parse")
    }

    #[tokio::test]
    async fn functional_run_action_skips_plain_issue_comment() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("event.json");
        std::fs::write(
            &path,
            r#"{"issue":{"number":3},"comment":{"body":"@aiissue"},"repository":{"full_name":"owner/repo"}}"#,
        )
        .expect("write event");

        let outcome = run_action(&cli_for(&path)).await.expect("skip is not an error");
        assert!(matches!(outcome, RunOutcome::Skipped { .. }));
    }

    #[tokio::test]
    async fn functional_run_action_skips_comment_without_phrase() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("event.json");
        std::fs::write(
            &path,
            r#"{"issue":{"number":3,"pull_request":{"url":"x"}},"comment":{"body":"looks good"},"repository":{"full_name":"owner/repo"}}"#,
        )
        .expect("write event");

        let outcome = run_action(&cli_for(&path)).await.expect("skip is not an error");
        assert!(matches!(outcome, RunOutcome::Skipped { reason } if reason.contains("@aiissue")));
    }

    #[tokio::test]
    async fn regression_run_action_fails_on_unreadable_event_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let error = run_action(&cli_for(&temp.path().join("missing.json")))
            .await
            .expect_err("missing event file must fail");
        let error = error
            .downcast_ref::<aiissue_core::AiIssueError>()
            .expect("typed error");
        assert_eq!(error.kind(), "malformed_event");
    }
}
