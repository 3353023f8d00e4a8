pub(crate) const ERROR_BODY_MAX_CHARS: usize = 800;

pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Statuses GitHub returns when an organization-level feature is unavailable
/// to the caller: user-owned repositories, disabled previews, missing scopes.
pub fn is_feature_unavailable_status(status: u16) -> bool {
    matches!(status, 403 | 404 | 410)
}
