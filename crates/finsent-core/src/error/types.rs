//! Core error types and traits for Finsent

use thiserror::Error;

/// Result type alias for Finsent operations
pub type FinsentResult<T> = Result<T, FinsentError>;

/// Unified error trait implemented by [`FinsentError`].
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Check if this error is worth retrying
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Main error type for Finsent
#[derive(Error, Debug, Clone)]
pub enum FinsentError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// The API key could not be loaded
    #[error("Credential missing: {message}")]
    CredentialMissing {
        message: String,
        path: Option<String>,
    },

    /// Completion service errors (bad payload, provider-side rejection)
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
        context: Option<String>,
    },

    /// HTTP transport errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// CSV dataset errors
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// Request timeout
    #[error("Request timeout after {seconds} seconds")]
    Timeout {
        seconds: u64,
        context: Option<String>,
    },

    /// A wait was cancelled through the session's cancellation token
    #[error("Operation was cancelled")]
    Cancelled,

    /// `annotate` was called after `close`
    #[error("Session is closed")]
    SessionClosed,

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}
