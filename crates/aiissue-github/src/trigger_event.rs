use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::repo_ref::{RepoRef, RepoRefParseError};

/// Comment phrase that activates issue creation.
pub const TRIGGER_PHRASE: &str = "@aiissue";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A pull request comment that may request issue creation.
pub struct TriggerEvent {
    pub repository: RepoRef,
    pub pr_number: u64,
    pub comment_text: String,
}

#[derive(Debug, Error)]
/// Enumerates supported `EventError` values.
pub enum EventError {
    #[error("failed to read event payload {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("event payload is not valid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("event is not a comment on a pull request")]
    NotPullRequestComment,
    #[error("event payload is missing field '{0}'")]
    MissingField(&'static str),
    #[error(transparent)]
    InvalidRepository(#[from] RepoRefParseError),
}

impl EventError {
    /// True for events that are well-formed but simply not addressed to us.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotPullRequestComment)
    }
}

/// Case-insensitive substring match of [`TRIGGER_PHRASE`].
pub fn comment_has_trigger(comment_text: &str) -> bool {
    comment_text.to_lowercase().contains(TRIGGER_PHRASE)
}

pub fn read_trigger_event(path: &Path) -> Result<TriggerEvent, EventError> {
    let raw = std::fs::read_to_string(path).map_err(|source| EventError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: Value = serde_json::from_str(&raw)?;
    parse_trigger_event(&payload)
}

/// Extracts the trigger fields from an `issue_comment` payload.
///
/// A missing `issue`, or a missing, `null`, or empty `issue.pull_request`,
/// means the comment was not left on a pull request and yields
/// [`EventError::NotPullRequestComment`].
pub fn parse_trigger_event(payload: &Value) -> Result<TriggerEvent, EventError> {
    let issue = payload.get("issue");
    if !has_pull_request_link(issue.and_then(|issue| issue.get("pull_request"))) {
        return Err(EventError::NotPullRequestComment);
    }

    let pr_number = issue
        .and_then(|issue| issue.get("number"))
        .and_then(Value::as_u64)
        .filter(|number| *number > 0)
        .ok_or(EventError::MissingField("issue.number"))?;
    let comment_text = payload
        .get("comment")
        .and_then(|comment| comment.get("body"))
        .and_then(Value::as_str)
        .ok_or(EventError::MissingField("comment.body"))?;
    let full_name = payload
        .get("repository")
        .and_then(|repository| repository.get("full_name"))
        .and_then(Value::as_str)
        .ok_or(EventError::MissingField("repository.full_name"))?;

    Ok(TriggerEvent {
        repository: RepoRef::parse(full_name)?,
        pr_number,
        comment_text: comment_text.to_string(),
    })
}

fn has_pull_request_link(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::{comment_has_trigger, parse_trigger_event, read_trigger_event, EventError};

    fn pr_comment_payload() -> serde_json::Value {
        json!({
            "issue": {
                "number": 123,
                "pull_request": {"url": "https://api.github.com/repos/owner/repo/pulls/123"}
            },
            "comment": {"body": "Please @aiissue create an issue for this"},
            "repository": {"full_name": "owner/repo"}
        })
    }

    #[test]
    fn unit_comment_has_trigger_is_case_insensitive_substring() {
        assert!(comment_has_trigger("@AIIssue please"));
        assert!(comment_has_trigger("looks good ...@aiissue"));
        assert!(comment_has_trigger("x@aiissuex"));
        assert!(!comment_has_trigger("aiissue"));
        assert!(!comment_has_trigger("@ aiissue"));
        assert!(!comment_has_trigger(""));
    }

    #[test]
    fn functional_parse_trigger_event_extracts_pr_comment_fields() {
        let event = parse_trigger_event(&pr_comment_payload()).expect("parse");
        assert_eq!(event.repository.as_slug(), "owner/repo");
        assert_eq!(event.pr_number, 123);
        assert_eq!(
            event.comment_text,
            "Please @aiissue create an issue for this"
        );
    }

    #[test]
    fn unit_parse_trigger_event_flags_plain_issue_comments_as_not_applicable() {
        let mut payload = pr_comment_payload();
        payload["issue"]
            .as_object_mut()
            .expect("issue object")
            .remove("pull_request");
        let error = parse_trigger_event(&payload).expect_err("must fail");
        assert!(matches!(error, EventError::NotPullRequestComment));
        assert!(error.is_not_applicable());

        payload["issue"]["pull_request"] = json!(null);
        assert!(parse_trigger_event(&payload)
            .expect_err("null link")
            .is_not_applicable());

        payload["issue"]["pull_request"] = json!({});
        assert!(parse_trigger_event(&payload)
            .expect_err("empty link")
            .is_not_applicable());
    }

    #[test]
    fn regression_parse_trigger_event_reports_each_missing_field() {
        let cases: [(&str, fn(&mut serde_json::Value)); 3] = [
            ("issue.number", |payload| {
                payload["issue"]["number"] = json!(0);
            }),
            ("comment.body", |payload| {
                payload["comment"] = json!({});
            }),
            ("repository.full_name", |payload| {
                payload["repository"] = json!({"name": "repo"});
            }),
        ];
        for (field, mutate) in cases {
            let mut payload = pr_comment_payload();
            mutate(&mut payload);
            match parse_trigger_event(&payload) {
                Err(EventError::MissingField(missing)) => assert_eq!(missing, field),
                other => panic!("expected missing {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn regression_parse_trigger_event_treats_missing_issue_as_not_applicable() {
        let mut payload = pr_comment_payload();
        payload.as_object_mut().expect("object").remove("issue");
        let error = parse_trigger_event(&payload).expect_err("must not proceed");
        assert!(matches!(error, EventError::NotPullRequestComment));
        assert!(error.is_not_applicable());
    }

    #[test]
    fn regression_parse_trigger_event_rejects_malformed_repository() {
        let mut payload = pr_comment_payload();
        payload["repository"]["full_name"] = json!("no-slash");
        let error = parse_trigger_event(&payload).expect_err("must fail");
        assert!(matches!(error, EventError::InvalidRepository(_)));
        assert!(!error.is_not_applicable());
    }

    #[test]
    fn integration_read_trigger_event_loads_payload_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{}", pr_comment_payload()).expect("write");
        let event = read_trigger_event(file.path()).expect("read");
        assert_eq!(event.pr_number, 123);

        let mut broken = tempfile::NamedTempFile::new().expect("tempfile");
        write!(broken, "{{not json").expect("write");
        assert!(matches!(
            read_trigger_event(broken.path()),
            Err(EventError::InvalidJson(_))
        ));

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            read_trigger_event(&missing),
            Err(EventError::Read { .. })
        ));
    }
}
