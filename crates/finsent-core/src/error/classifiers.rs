//! Message-based classification for provider errors that only carry text

/// Whether a provider error message describes a transient condition.
pub(super) fn is_retryable_message(message: &str) -> bool {
    let msg_lower = message.to_lowercase();
    msg_lower.contains("503")
        || msg_lower.contains("502")
        || msg_lower.contains("504")
        || msg_lower.contains("429")
        || msg_lower.contains("overloaded")
        || msg_lower.contains("timeout")
        || msg_lower.contains("connection")
        || msg_lower.contains("network")
}
