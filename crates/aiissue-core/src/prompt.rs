use serde_json::{json, Value};

use crate::models::{PrContext, VocabularyEntry};

pub const ISSUE_CONTENT_SCHEMA_NAME: &str = "issue_content";

pub const SYSTEM_PROMPT: &str =
    "You are an experienced software engineer who writes clear, informative GitHub issues.";

/// JSON schema the model's reply must satisfy.
pub fn issue_content_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["title", "body", "labels", "issue_type"],
        "properties": {
            "title": {
                "type": "string",
                "description": "Concise issue title"
            },
            "body": {
                "type": "string",
                "description": "Issue description in markdown"
            },
            "labels": {
                "type": "array",
                "items": {"type": "string"},
                "description": "Labels chosen from the available labels"
            },
            "issue_type": {
                "type": ["string", "null"],
                "description": "One issue type chosen from the available types, or null"
            }
        }
    })
}

fn render_vocabulary(entries: &[VocabularyEntry], kind: &str) -> String {
    if entries.is_empty() {
        return "(none)".to_string();
    }
    entries
        .iter()
        .map(|entry| match entry.description.as_deref() {
            Some(description) => {
                format!("- {}\n  {kind} description: {description}", entry.name)
            }
            None => format!("- {}", entry.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_issue_prompt(
    pr: &PrContext,
    labels: &[VocabularyEntry],
    types: &[VocabularyEntry],
) -> String {
    let body = if pr.body.trim().is_empty() {
        "(empty)"
    } else {
        pr.body.as_str()
    };
    format!(
        "Based on the following pull request, write the issue that this pull request resolves.

Pull request:
- Title: {title}
- Description: {body}
- Author: {author}
- Files changed: {files_changed}
- Lines added: {additions}
- Lines deleted: {deletions}

Labels available in the repository:
{labels}

Issue types available in the repository:
{types}

Produce:
1. A short, informative issue title.
2. A markdown description of the problem or task this pull request resolves.
3. The matching labels, chosen only from the available labels.
4. At most one issue type, chosen only from the available issue types, or null.

The description should be structured and cover:
- The context of the problem
- Why it matters",
        title = pr.title,
        author = pr.author,
        files_changed = pr.files_changed,
        additions = pr.additions,
        deletions = pr.deletions,
        labels = render_vocabulary(labels, "Label"),
        types = render_vocabulary(types, "Type"),
    )
}
