//! Audit record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened to one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum AuditOutcome {
    /// The provider answered. `response` is the raw response body, embedded
    /// as JSON when it parses and as a string otherwise.
    Success { label: String, response: Value },
    /// The call failed
    Failure { reason: String },
}

/// One line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Name of the session that wrote the entry, usually the input file name
    pub session: String,
    /// Position within the session, starting at 1
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub provider: String,
    pub model_id: String,
    #[serde(flatten)]
    pub outcome: AuditOutcome,
}

impl AuditLogEntry {
    /// Record a successful completion
    pub fn success(
        session: impl Into<String>,
        sequence: u64,
        provider: impl Into<String>,
        model_id: impl Into<String>,
        label: impl Into<String>,
        raw_payload: &str,
    ) -> Self {
        let response = serde_json::from_str(raw_payload)
            .unwrap_or_else(|_| Value::String(raw_payload.to_string()));
        Self {
            session: session.into(),
            sequence,
            timestamp: Utc::now(),
            provider: provider.into(),
            model_id: model_id.into(),
            outcome: AuditOutcome::Success {
                label: label.into(),
                response,
            },
        }
    }

    /// Record a failed call
    pub fn failure(
        session: impl Into<String>,
        sequence: u64,
        provider: impl Into<String>,
        model_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            session: session.into(),
            sequence,
            timestamp: Utc::now(),
            provider: provider.into(),
            model_id: model_id.into(),
            outcome: AuditOutcome::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AuditOutcome::Success { .. })
    }
}
