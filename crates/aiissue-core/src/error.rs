use aiissue_ai::AiError;
use aiissue_github::{EventError, GithubError};
use thiserror::Error;

#[derive(Debug, Error)]
/// Failure of one of the two remote services.
pub enum UpstreamError {
    #[error(transparent)]
    Github(#[from] GithubError),
    #[error("model api: {0}")]
    Model(#[source] AiError),
}

#[derive(Debug, Error)]
/// Enumerates supported `AiIssueError` values.
pub enum AiIssueError {
    #[error("malformed event: {0}")]
    MalformedEvent(#[from] EventError),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("generation failure: {0}")]
    GenerationFailure(String),
}

impl AiIssueError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedEvent(_) => "malformed_event",
            Self::Configuration(_) => "configuration_error",
            Self::Upstream(_) => "upstream_error",
            Self::GenerationFailure(_) => "generation_failure",
        }
    }

    /// Process exit status shared by every failure kind.
    pub const EXIT_FAILURE: u8 = 1;
}

impl From<GithubError> for AiIssueError {
    fn from(error: GithubError) -> Self {
        Self::Upstream(UpstreamError::Github(error))
    }
}

impl From<AiError> for AiIssueError {
    fn from(error: AiError) -> Self {
        match error {
            AiError::MissingApiKey => Self::Configuration("missing model API key".to_string()),
            error if error.is_transport() => Self::Upstream(UpstreamError::Model(error)),
            error => Self::GenerationFailure(error.to_string()),
        }
    }
}
