use aiissue_github::GithubApiClient;
use tracing::{info, warn};

use crate::context_fetcher::{fetch_pr_context, fetch_vocabulary};
use crate::generator::IssueGenerator;
use crate::models::{FinalIssuePayload, GeneratedContent};
use crate::publisher::{link_back, publish_issue, LinkBackOutcome};
use crate::reconcile::reconcile;
use crate::AiIssueError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub issue_number: u64,
    pub issue_url: String,
    pub labels: Vec<String>,
    pub issue_type: Option<String>,
    pub link_back: LinkBackOutcome,
}

/// Runs fetch, generate, reconcile, publish, and link-back in order. Any stage
/// failure aborts the run; an issue already created is left in place.
pub struct IssuePipeline {
    github: GithubApiClient,
    generator: IssueGenerator,
    server_url: String,
}

impl IssuePipeline {
    pub fn new(github: GithubApiClient, generator: IssueGenerator, server_url: String) -> Self {
        Self {
            github,
            generator,
            server_url,
        }
    }

    pub async fn run(&self, pr_number: u64) -> Result<PipelineReport, AiIssueError> {
        let repository = self.github.repo().as_slug();
        info!(%repository, pr_number, "fetching pull request context");
        let pr = fetch_pr_context(&self.github, pr_number).await?;
        let vocabulary = fetch_vocabulary(&self.github).await?;
        info!(
            labels = vocabulary.labels.len(),
            types = vocabulary.types.len(),
            "repository vocabulary loaded"
        );

        info!(%repository, pr_number, "generating issue content");
        let content = self.generator.generate(&pr, &vocabulary).await?;

        let payload = reconcile(&content, &vocabulary).with_assignees(pr.assignee_logins.clone());
        log_reconciliation(&content, &payload);

        info!(%repository, pr_number, "creating issue");
        let issue = publish_issue(&self.github, &payload, &self.server_url).await?;

        let linked = link_back(&self.github, pr_number, issue.number).await?;
        info!(
            %repository,
            pr_number,
            issue_number = issue.number,
            "issue created and linked to pull request"
        );

        Ok(PipelineReport {
            issue_number: issue.number,
            issue_url: issue.url,
            labels: payload.labels,
            issue_type: payload.issue_type,
            link_back: linked,
        })
    }
}

fn log_reconciliation(content: &GeneratedContent, payload: &FinalIssuePayload) {
    let dropped: Vec<&str> = content
        .labels
        .iter()
        .filter(|label| !payload.labels.contains(label))
        .map(String::as_str)
        .collect();
    if !dropped.is_empty() {
        warn!(?dropped, "dropped labels missing from repository vocabulary");
    }
    if let (Some(proposed), Some(applied)) = (&content.issue_type, &payload.issue_type) {
        if proposed != applied {
            warn!(%proposed, %applied, "proposed issue type replaced");
        }
    }
}
