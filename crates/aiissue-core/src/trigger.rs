use aiissue_github::{comment_has_trigger, EventError, TriggerEvent, TRIGGER_PHRASE};

use crate::AiIssueError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    Proceed(TriggerEvent),
    Skip { reason: String },
}

/// Turns a parsed event into a go/no-go decision. Comments outside pull
/// requests and comments without the trigger phrase are skips, not failures.
pub fn decide_trigger(
    parsed: Result<TriggerEvent, EventError>,
) -> Result<TriggerDecision, AiIssueError> {
    let event = match parsed {
        Ok(event) => event,
        Err(error) if error.is_not_applicable() => {
            return Ok(TriggerDecision::Skip {
                reason: error.to_string(),
            });
        }
        Err(error) => return Err(AiIssueError::MalformedEvent(error)),
    };

    if !comment_has_trigger(&event.comment_text) {
        return Ok(TriggerDecision::Skip {
            reason: format!("comment does not contain {TRIGGER_PHRASE}"),
        });
    }
    Ok(TriggerDecision::Proceed(event))
}

#[cfg(test)]
mod tests {
    use aiissue_github::{EventError, RepoRef, TriggerEvent};

    use super::{decide_trigger, TriggerDecision};

    fn event(comment: &str) -> TriggerEvent {
        TriggerEvent {
            repository: RepoRef::parse("owner/repo").expect("repo"),
            pr_number: 12,
            comment_text: comment.to_string(),
        }
    }

    #[test]
    fn functional_decide_trigger_proceeds_on_phrase() {
        let decision = decide_trigger(Ok(event("@AIIssue please"))).expect("decision");
        assert!(matches!(decision, TriggerDecision::Proceed(event) if event.pr_number == 12));
    }

    #[test]
    fn unit_decide_trigger_skips_without_phrase() {
        let decision = decide_trigger(Ok(event("aiissue"))).expect("decision");
        assert!(matches!(decision, TriggerDecision::Skip { .. }));
    }

    #[test]
    fn unit_decide_trigger_skips_plain_issue_comments() {
        let decision =
            decide_trigger(Err(EventError::NotPullRequestComment)).expect("decision");
        assert!(matches!(decision, TriggerDecision::Skip { .. }));
    }

    #[test]
    fn regression_decide_trigger_fails_on_missing_fields() {
        let error = decide_trigger(Err(EventError::MissingField("comment.body")))
            .expect_err("must fail");
        assert_eq!(error.kind(), "malformed_event");
    }
}
