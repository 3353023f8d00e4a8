use std::path::PathBuf;

use clap::Parser;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_temperature(value: &str) -> Result<f32, String> {
    let parsed = value
        .parse::<f32>()
        .map_err(|error| format!("failed to parse float: {error}"))?;
    if !parsed.is_finite() || !(0.0..=2.0).contains(&parsed) {
        return Err("value must be a finite number in range 0..=2".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "aiissue",
    about = "Turns a pull request into a tracked GitHub issue when a review comment mentions @aiissue",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long = "event-path",
        env = "GITHUB_EVENT_PATH",
        help = "Path to the JSON payload of the triggering issue_comment event"
    )]
    pub(crate) event_path: Option<PathBuf>,

    #[arg(
        long = "github-output",
        env = "GITHUB_OUTPUT",
        help = "Workflow output file; outputs are appended as name=value lines. Falls back to ::set-output on stdout"
    )]
    pub(crate) github_output: Option<PathBuf>,

    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "Token with issue and pull request write access. INPUT_GITHUB_TOKEN is used when unset"
    )]
    pub(crate) github_token: Option<String>,

    #[arg(
        long = "openai-api-key",
        env = "INPUT_OPENAI_API_KEY",
        hide_env_values = true,
        help = "Model API key. OPENAI_API_KEY is used when unset"
    )]
    pub(crate) openai_api_key: Option<String>,

    #[arg(
        long = "openai-organization",
        env = "OPENAI_ORG_ID",
        help = "Optional organization id sent with model requests"
    )]
    pub(crate) openai_organization: Option<String>,

    #[arg(
        long = "github-api-base",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com",
        help = "Base URL of the GitHub REST API"
    )]
    pub(crate) github_api_base: String,

    #[arg(
        long = "github-server-url",
        env = "GITHUB_SERVER_URL",
        default_value = "https://github.com",
        help = "Web base URL used to build issue links when the API omits html_url"
    )]
    pub(crate) github_server_url: String,

    #[arg(
        long = "openai-api-base",
        env = "OPENAI_BASE_URL",
        default_value = "https://api.openai.com/v1",
        help = "Base URL for OpenAI-compatible APIs"
    )]
    pub(crate) openai_api_base: String,

    #[arg(
        long,
        env = "AIISSUE_MODEL",
        default_value = "gpt-4o-2024-08-06",
        help = "Chat model used to draft the issue"
    )]
    pub(crate) model: String,

    #[arg(
        long,
        env = "AIISSUE_TEMPERATURE",
        default_value = "0.7",
        value_parser = parse_temperature,
        help = "Sampling temperature for the model request"
    )]
    pub(crate) temperature: f32,

    #[arg(
        long = "request-timeout-ms",
        env = "AIISSUE_REQUEST_TIMEOUT_MS",
        default_value = "60000",
        value_parser = parse_positive_u64,
        help = "HTTP timeout in milliseconds for GitHub and model requests"
    )]
    pub(crate) request_timeout_ms: u64,
}
