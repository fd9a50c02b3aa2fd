//! From trait implementations for FinsentError conversions

use super::types::FinsentError;

impl From<anyhow::Error> for FinsentError {
    fn from(error: anyhow::Error) -> Self {
        Self::other(error.to_string())
    }
}

impl From<std::io::Error> for FinsentError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for FinsentError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<csv::Error> for FinsentError {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            message: error.to_string(),
            path: None,
            context: None,
        }
    }
}

impl From<reqwest::Error> for FinsentError {
    fn from(error: reqwest::Error) -> Self {
        // The limit is not known here; callers that know it build a Timeout
        let message = if error.is_timeout() {
            format!("request timed out: {}", error)
        } else {
            error.to_string()
        };
        Self::Http {
            message,
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            context: None,
        }
    }
}
