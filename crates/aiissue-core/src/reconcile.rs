//! Maps untrusted model output onto the repository's label and type vocabulary.
//!
//! Everything here is pure: the same content and vocabulary always produce the
//! same payload, and every label in the result exists in a non-empty label
//! vocabulary.

use std::collections::HashSet;

use crate::models::{FinalIssuePayload, GeneratedContent, RepositoryVocabulary};

#[derive(Debug, Clone, PartialEq, Eq)]
/// How a proposed issue type is carried into the final payload.
pub enum TypeResolution {
    /// The repository has no issue types; the type becomes a label.
    FoldIntoLabels(String),
    /// The proposed type exists and is sent as the issue's type.
    Keep(String),
    /// The proposed type is unknown; the first repository type replaces it.
    Substitute { proposed: String, replacement: String },
}

pub fn resolve_issue_type(proposed: &str, vocabulary: &RepositoryVocabulary) -> TypeResolution {
    if vocabulary.types.is_empty() {
        return TypeResolution::FoldIntoLabels(proposed.to_string());
    }
    if vocabulary.has_type(proposed) {
        return TypeResolution::Keep(proposed.to_string());
    }
    // `types` is non-empty here, checked above.
    let replacement = vocabulary.types[0].name.clone();
    TypeResolution::Substitute {
        proposed: proposed.to_string(),
        replacement,
    }
}

/// Produces the payload sent to the issue API. Assignees are left empty and
/// attached by the caller.
pub fn reconcile(
    content: &GeneratedContent,
    vocabulary: &RepositoryVocabulary,
) -> FinalIssuePayload {
    let mut labels = filter_labels(&content.labels, vocabulary);

    let issue_type = match content
        .issue_type
        .as_deref()
        .filter(|proposed| !proposed.is_empty())
        .map(|proposed| resolve_issue_type(proposed, vocabulary))
    {
        None => None,
        Some(TypeResolution::FoldIntoLabels(type_label)) => {
            if label_allowed(&type_label, vocabulary) && !labels.contains(&type_label) {
                labels.push(type_label);
            }
            None
        }
        Some(TypeResolution::Keep(name)) => Some(name),
        Some(TypeResolution::Substitute { replacement, .. }) => Some(replacement),
    };

    FinalIssuePayload {
        title: content.title.clone(),
        body: content.body.clone(),
        labels,
        issue_type,
        assignee_logins: Vec::new(),
    }
}

fn label_allowed(label: &str, vocabulary: &RepositoryVocabulary) -> bool {
    vocabulary.labels.is_empty() || vocabulary.has_label(label)
}

fn filter_labels(labels: &[String], vocabulary: &RepositoryVocabulary) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut filtered = Vec::with_capacity(labels.len());
    for label in labels {
        if label_allowed(label, vocabulary) && seen.insert(label.as_str()) {
            filtered.push(label.clone());
        }
    }
    filtered
}
