use aiissue_github::GithubApiClient;
use tracing::warn;

use crate::models::{PrContext, RepositoryVocabulary, VocabularyEntry};
use crate::AiIssueError;

pub async fn fetch_pr_context(
    github: &GithubApiClient,
    pr_number: u64,
) -> Result<PrContext, AiIssueError> {
    let pr = github.get_pull_request(pr_number).await?;
    Ok(PrContext::from(pr))
}

/// Loads the repository's labels and, when the owner exposes them, its issue
/// types. An owner without issue types yields an empty type list.
pub async fn fetch_vocabulary(
    github: &GithubApiClient,
) -> Result<RepositoryVocabulary, AiIssueError> {
    let labels = github
        .list_labels()
        .await?
        .into_iter()
        .map(VocabularyEntry::from)
        .collect();

    let types = match github.list_issue_types().await? {
        Some(types) => types.into_iter().map(VocabularyEntry::from).collect(),
        None => {
            warn!(
                owner = %github.repo().owner,
                "issue types are not available for this owner; types will be applied as labels"
            );
            Vec::new()
        }
    };

    Ok(RepositoryVocabulary { labels, types })
}
