use aiissue_core::AiIssueError;

use crate::cli_args::Cli;

pub(crate) const GITHUB_TOKEN_FALLBACK_ENV: &str = "INPUT_GITHUB_TOKEN";
pub(crate) const OPENAI_API_KEY_FALLBACK_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) github_token: String,
    pub(crate) openai_api_key: String,
}

/// Resolves both secrets, preferring the primary value over the fallback
/// variable. Whitespace-only values count as unset.
pub(crate) fn resolve_credentials<F>(cli: &Cli, lookup: F) -> Result<Credentials, AiIssueError>
where
    F: Fn(&str) -> Option<String>,
{
    let github_token = resolve_secret(
        cli.github_token.as_deref(),
        GITHUB_TOKEN_FALLBACK_ENV,
        &lookup,
    )
    .ok_or_else(|| {
        AiIssueError::Configuration(format!(
            "missing GitHub token (set GITHUB_TOKEN or {GITHUB_TOKEN_FALLBACK_ENV})"
        ))
    })?;
    let openai_api_key = resolve_secret(
        cli.openai_api_key.as_deref(),
        OPENAI_API_KEY_FALLBACK_ENV,
        &lookup,
    )
    .ok_or_else(|| {
        AiIssueError::Configuration(format!(
            "missing model API key (set INPUT_OPENAI_API_KEY or {OPENAI_API_KEY_FALLBACK_ENV})"
        ))
    })?;

    Ok(Credentials {
        github_token,
        openai_api_key,
    })
}

fn resolve_secret<F>(primary: Option<&str>, fallback_env: &str, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(primary.map(str::to_string)).or_else(|| non_blank(lookup(fallback_env)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
