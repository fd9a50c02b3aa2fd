use super::*;

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(FinsentError::config("x").error_code(), "FINSENT_CONFIG");
    assert_eq!(FinsentError::SessionClosed.error_code(), "FINSENT_SESSION_CLOSED");
    assert_eq!(
        FinsentError::credential_missing("no key", "API-key.txt").error_code(),
        "FINSENT_CREDENTIAL"
    );
}

#[test]
fn test_retryable_classification() {
    assert!(FinsentError::timeout(30).is_retryable());
    assert!(FinsentError::http_status("too many requests", 429).is_retryable());
    assert!(FinsentError::http_status("bad gateway", 502).is_retryable());
    assert!(!FinsentError::http_status("unauthorized", 401).is_retryable());
    assert!(!FinsentError::http_status("bad request", 400).is_retryable());
    assert!(FinsentError::llm("upstream overloaded").is_retryable());
    assert!(!FinsentError::llm("missing content in response").is_retryable());
    assert!(!FinsentError::SessionClosed.is_retryable());
}

#[test]
fn test_with_context_sets_context() {
    let err = FinsentError::io("disk full").with_context("writing audit log");
    assert_eq!(err.context(), Some("writing audit log"));
    assert_eq!(err.message(), "disk full");

    // Variants without a context slot are returned unchanged
    let err = FinsentError::Cancelled.with_context("ignored");
    assert!(err.context().is_none());
}

#[test]
fn test_display_includes_message() {
    let err = FinsentError::invalid_input_field("unknown choice '3'", "bank");
    assert_eq!(err.to_string(), "Invalid input: unknown choice '3'");
}
