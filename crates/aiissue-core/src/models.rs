use aiissue_github::{CreateIssueRequest, GithubIssueType, GithubLabel, GithubPullRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AiIssueError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Snapshot of the pull request the issue is drafted from.
pub struct PrContext {
    pub title: String,
    pub body: String,
    pub author: String,
    pub assignee_logins: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub files_changed: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl From<GithubPullRequest> for PrContext {
    fn from(pr: GithubPullRequest) -> Self {
        Self {
            title: pr.title,
            body: pr.body.unwrap_or_default(),
            author: pr.user.login,
            assignee_logins: pr.assignees.into_iter().map(|user| user.login).collect(),
            created_at: pr.created_at,
            files_changed: pr.changed_files,
            additions: pr.additions,
            deletions: pr.deletions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyEntry {
    pub name: String,
    pub description: Option<String>,
}

impl VocabularyEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

impl From<GithubLabel> for VocabularyEntry {
    fn from(label: GithubLabel) -> Self {
        Self {
            name: label.name,
            description: label.description.filter(|text| !text.trim().is_empty()),
        }
    }
}

impl From<GithubIssueType> for VocabularyEntry {
    fn from(issue_type: GithubIssueType) -> Self {
        Self {
            name: issue_type.name,
            description: issue_type.description.filter(|text| !text.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
/// Labels and issue types the target repository accepts, in API order.
pub struct RepositoryVocabulary {
    pub labels: Vec<VocabularyEntry>,
    pub types: Vec<VocabularyEntry>,
}

impl RepositoryVocabulary {
    pub fn from_names<L, T>(labels: L, types: T) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(VocabularyEntry::named).collect(),
            types: types.into_iter().map(VocabularyEntry::named).collect(),
        }
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|entry| entry.name == name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.iter().any(|entry| entry.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Model-proposed issue draft, validated but not yet reconciled.
pub struct GeneratedContent {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub issue_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGeneratedContent {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    labels: Option<Vec<String>>,
    #[serde(default)]
    issue_type: Option<String>,
}

impl GeneratedContent {
    /// Validates the structured text returned by the model.
    pub fn from_model_output(raw: &str) -> Result<Self, AiIssueError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AiIssueError::GenerationFailure(
                "model returned an empty response".to_string(),
            ));
        }
        let parsed: RawGeneratedContent = serde_json::from_str(trimmed).map_err(|error| {
            AiIssueError::GenerationFailure(format!("model output is not valid issue json: {error}"))
        })?;

        let title = parsed
            .title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .ok_or_else(|| {
                AiIssueError::GenerationFailure("model output has an empty title".to_string())
            })?;

        Ok(Self {
            title,
            body: parsed.body.unwrap_or_default(),
            labels: parsed
                .labels
                .unwrap_or_default()
                .into_iter()
                .filter(|label| !label.trim().is_empty())
                .collect(),
            issue_type: parsed.issue_type.filter(|value| !value.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Issue payload guaranteed valid against the repository vocabulary.
pub struct FinalIssuePayload {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub issue_type: Option<String>,
    pub assignee_logins: Vec<String>,
}

impl FinalIssuePayload {
    pub fn with_assignees(mut self, assignee_logins: Vec<String>) -> Self {
        self.assignee_logins = assignee_logins;
        self
    }

    pub fn to_create_request(&self) -> CreateIssueRequest {
        CreateIssueRequest {
            title: self.title.clone(),
            body: self.body.clone(),
            labels: self.labels.clone(),
            assignees: self.assignee_logins.clone(),
            issue_type: self.issue_type.clone(),
        }
    }
}
