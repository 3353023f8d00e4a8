//! Closing-keyword reference appended to a pull request description.

pub fn closing_reference(issue_number: u64) -> String {
    format!("Closes #{issue_number}")
}

/// Looks for `Closes #<n>` not immediately followed by another digit, so that
/// `Closes #12` is not confused with `Closes #123`.
pub fn contains_closing_reference(body: &str, issue_number: u64) -> bool {
    let reference = closing_reference(issue_number);
    body.match_indices(reference.as_str()).any(|(start, _)| {
        !body[start + reference.len()..]
            .chars()
            .next()
            .is_some_and(|next| next.is_ascii_digit())
    })
}

/// Returns the new body, or `None` when the reference is already present.
pub fn append_closing_reference(body: &str, issue_number: u64) -> Option<String> {
    if contains_closing_reference(body, issue_number) {
        return None;
    }
    let reference = closing_reference(issue_number);
    if body.trim().is_empty() {
        return Some(reference);
    }
    Some(format!("{body}\n\n{reference}"))
}
