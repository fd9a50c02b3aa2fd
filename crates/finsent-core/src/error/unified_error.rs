//! UnifiedError trait implementation for FinsentError

use super::classifiers::is_retryable_message;
use super::types::{FinsentError, UnifiedError};

impl UnifiedError for FinsentError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "FINSENT_CONFIG",
            Self::CredentialMissing { .. } => "FINSENT_CREDENTIAL",
            Self::Llm { .. } => "FINSENT_LLM",
            Self::Http { .. } => "FINSENT_HTTP",
            Self::Io { .. } => "FINSENT_IO",
            Self::Json { .. } => "FINSENT_JSON",
            Self::Csv { .. } => "FINSENT_CSV",
            Self::InvalidInput { .. } => "FINSENT_INVALID_INPUT",
            Self::Timeout { .. } => "FINSENT_TIMEOUT",
            Self::Cancelled => "FINSENT_CANCELLED",
            Self::SessionClosed => "FINSENT_SESSION_CLOSED",
            Self::Other { .. } => "FINSENT_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. }
            | Self::CredentialMissing { message, .. }
            | Self::Llm { message, .. }
            | Self::Http { message, .. }
            | Self::Io { message, .. }
            | Self::Json { message, .. }
            | Self::Csv { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::Other { message, .. } => message,
            Self::Timeout { .. } => "Request timeout",
            Self::Cancelled => "Operation was cancelled",
            Self::SessionClosed => "Session is closed",
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::Llm { context, .. }
            | Self::Http { context, .. }
            | Self::Io { context, .. }
            | Self::Json { context, .. }
            | Self::Csv { context, .. }
            | Self::InvalidInput { context, .. }
            | Self::Timeout { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
            Self::CredentialMissing { path, .. } => path.as_deref(),
            Self::Cancelled | Self::SessionClosed => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http {
                status_code: Some(code),
                ..
            } => matches!(code, 429 | 502 | 503 | 504),
            // No status means the request never got a response
            Self::Http {
                status_code: None, ..
            } => true,
            Self::Llm { message, .. } => is_retryable_message(message),
            _ => false,
        }
    }
}
