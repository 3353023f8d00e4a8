use aiissue_github::{append_closing_reference, GithubApiClient};
use tracing::info;

use crate::models::FinalIssuePayload;
use crate::AiIssueError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedIssue {
    pub number: u64,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkBackOutcome {
    Linked,
    AlreadyLinked,
}

pub async fn publish_issue(
    github: &GithubApiClient,
    payload: &FinalIssuePayload,
    server_url: &str,
) -> Result<PublishedIssue, AiIssueError> {
    let created = github.create_issue(&payload.to_create_request()).await?;
    let url = created.html_url.unwrap_or_else(|| {
        format!(
            "{}/{}/issues/{}",
            server_url.trim_end_matches('/'),
            github.repo().as_slug(),
            created.number
        )
    });
    info!(issue_number = created.number, %url, "issue created");
    Ok(PublishedIssue {
        number: created.number,
        url,
    })
}

/// Adds `Closes #<issue>` to the pull request body unless it is already there.
/// The body is re-read first so a concurrent edit is not clobbered by a stale copy.
pub async fn link_back(
    github: &GithubApiClient,
    pr_number: u64,
    issue_number: u64,
) -> Result<LinkBackOutcome, AiIssueError> {
    let current = github.get_pull_request(pr_number).await?;
    let body = current.body.unwrap_or_default();
    let Some(updated) = append_closing_reference(&body, issue_number) else {
        info!(pr_number, issue_number, "pull request already references issue");
        return Ok(LinkBackOutcome::AlreadyLinked);
    };
    github.update_pull_request_body(pr_number, &updated).await?;
    info!(pr_number, issue_number, "pull request description updated");
    Ok(LinkBackOutcome::Linked)
}
