use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::github_transport_helpers::{
    is_feature_unavailable_status, truncate_for_error, ERROR_BODY_MAX_CHARS,
};
use crate::github_types::{
    CreateIssueRequest, GithubCreatedIssue, GithubIssueType, GithubLabel, GithubPullRequest,
};
use crate::repo_ref::RepoRef;

const LABELS_PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
/// Enumerates supported `GithubError` values.
pub enum GithubError {
    #[error("invalid github authorization header")]
    InvalidHeader,
    #[error("failed to create github api client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("github api {operation} request failed: {source}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("github api {operation} failed with status {status}: {body}")]
    HttpStatus {
        operation: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode github {operation}: {source}")]
    Decode {
        operation: String,
        #[source]
        source: reqwest::Error,
    },
}

impl GithubError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GithubApiClientConfig {
    pub api_base: String,
    pub token: String,
    pub request_timeout_ms: u64,
}

#[derive(Clone)]
/// REST client scoped to a single repository.
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    repo: RepoRef,
}

impl GithubApiClient {
    pub fn new(config: GithubApiClientConfig, repo: RepoRef) -> Result<Self, GithubError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("aiissue"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", config.token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .map_err(|_| GithubError::InvalidHeader)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()
            .map_err(GithubError::Build)?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            repo,
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base, self.repo.owner, self.repo.name
        )
    }

    pub async fn get_pull_request(&self, number: u64) -> Result<GithubPullRequest, GithubError> {
        let url = format!("{}/pulls/{number}", self.repo_url());
        self.request_json("get pull request", self.http.get(url))
            .await
    }

    pub async fn list_labels(&self) -> Result<Vec<GithubLabel>, GithubError> {
        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            let page_value = page.to_string();
            let per_page = LABELS_PAGE_SIZE.to_string();
            let request = self
                .http
                .get(format!("{}/labels", self.repo_url()))
                .query(&[("per_page", per_page.as_str()), ("page", page_value.as_str())]);
            let chunk: Vec<GithubLabel> = self.request_json("list labels", request).await?;
            let chunk_len = chunk.len();
            rows.extend(chunk);
            if chunk_len < LABELS_PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }
        Ok(rows)
    }

    /// Lists the owner's issue types; `None` when the owner does not expose them.
    pub async fn list_issue_types(&self) -> Result<Option<Vec<GithubIssueType>>, GithubError> {
        let url = format!("{}/orgs/{}/issue-types", self.api_base, self.repo.owner);
        match self
            .request_json::<Vec<GithubIssueType>>("list issue types", self.http.get(url))
            .await
        {
            Ok(types) => Ok(Some(types)),
            Err(error)
                if error
                    .status()
                    .is_some_and(is_feature_unavailable_status) =>
            {
                debug!(owner = %self.repo.owner, %error, "issue types unavailable");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    pub async fn create_issue(
        &self,
        request: &CreateIssueRequest,
    ) -> Result<GithubCreatedIssue, GithubError> {
        let url = format!("{}/issues", self.repo_url());
        self.request_json("create issue", self.http.post(url).json(request))
            .await
    }

    /// Replaces the pull request description. The response body is not read;
    /// a 2xx status means the edit landed.
    pub async fn update_pull_request_body(
        &self,
        number: u64,
        body: &str,
    ) -> Result<(), GithubError> {
        let url = format!("{}/pulls/{number}", self.repo_url());
        let payload = json!({ "body": body });
        self.send_checked("update pull request", self.http.patch(url).json(&payload))
            .await?;
        Ok(())
    }

    async fn request_json<T>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GithubError>
    where
        T: DeserializeOwned,
    {
        self.send_checked(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|source| GithubError::Decode {
                operation: operation.to_string(),
                source,
            })
    }

    async fn send_checked(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GithubError> {
        let response = request
            .send()
            .await
            .map_err(|source| GithubError::Transport {
                operation: operation.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::HttpStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
                body: truncate_for_error(&body, ERROR_BODY_MAX_CHARS),
            });
        }
        Ok(response)
    }
}
