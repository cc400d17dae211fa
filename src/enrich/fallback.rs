//! Deterministic stand-ins used when no provider produced text.

/// Longest summary kept from the review itself, in characters.
pub const SUMMARY_CHAR_LIMIT: usize = 160;
pub const ELLIPSIS: &str = "...";

pub const REPLY: &str = "Thanks for your review! We appreciate your feedback.";
pub const ACTIONS: &str =
    "- Thank the customer\n- Investigate the issue\n- Improve service based on feedback";

pub fn reply() -> String {
    REPLY.to_string()
}

/// The review cut to [`SUMMARY_CHAR_LIMIT`] characters, marked when cut.
pub fn summary(review: &str) -> String {
    let mut chars = review.chars();
    let head: String = chars.by_ref().take(SUMMARY_CHAR_LIMIT).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

pub fn actions() -> String {
    ACTIONS.to_string()
}
