//! The annotation session state machine

use super::types::{SessionConfig, SessionState, SessionSummary};
use crate::annotation::{AnnotationClient, AnnotationRequest, AnnotationResult};
use crate::audit::{AuditLogEntry, AuditSink};
use crate::error::{FinsentError, FinsentResult};
use crate::quota::{QuotaTracker, estimate_tokens};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

/// Annotates articles one at a time under a quota, with an audit trail.
pub struct AnnotationSession {
    name: String,
    config: SessionConfig,
    tracker: QuotaTracker,
    client: AnnotationClient,
    sink: Box<dyn AuditSink>,
    cancel: CancellationToken,
    state: SessionState,
    sequence: u64,
    succeeded: u64,
    failed: u64,
    audit_errors: u64,
}

impl AnnotationSession {
    /// Open a new session
    pub fn new(
        name: impl Into<String>,
        config: SessionConfig,
        tracker: QuotaTracker,
        client: AnnotationClient,
        sink: Box<dyn AuditSink>,
    ) -> Self {
        let name = name.into();
        info!(
            session = %name,
            model = %config.model_id,
            provider = client.provider_name(),
            audit = %sink.target(),
            "session opened"
        );
        Self {
            name,
            config,
            tracker,
            client,
            sink,
            cancel: CancellationToken::new(),
            state: SessionState::Open,
            sequence: 0,
            succeeded: 0,
            failed: 0,
            audit_errors: 0,
        }
    }

    /// Use an external cancellation token for quota waits and calls
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Token that cancels this session's waits
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Annotate one article and return its label.
    ///
    /// Returns the model's raw answer on success and `"Error"` when the
    /// call failed. Exactly one audit entry is appended either way. A failure
    /// to write that entry is logged and does not fail the call.
    ///
    /// # Errors
    ///
    /// - [`FinsentError::SessionClosed`] after [`close`](Self::close).
    /// - [`FinsentError::Cancelled`] if the session token fires.
    #[instrument(skip(self, text), fields(session = %self.name, seq = self.sequence + 1))]
    pub async fn annotate(&mut self, text: &str) -> FinsentResult<String> {
        if self.state == SessionState::Closed {
            return Err(FinsentError::SessionClosed);
        }

        let estimate = estimate_tokens(text);
        self.tracker.reserve(estimate, &self.cancel).await?;

        let request = AnnotationRequest {
            text,
            system_instructions: &self.config.system_instructions,
            task_prompt: &self.config.task_prompt,
            model_id: &self.config.model_id,
            sampling: self.config.sampling,
        };
        let result = self
            .client
            .call_metered(&request, &mut self.tracker, &self.cancel)
            .await;

        self.sequence += 1;
        let provider = self.client.provider_name();
        let entry = match &result {
            AnnotationResult::Success { label, raw_payload } => {
                self.succeeded += 1;
                AuditLogEntry::success(
                    &self.name,
                    self.sequence,
                    provider,
                    &self.config.model_id,
                    label.as_str(),
                    raw_payload,
                )
            }
            AnnotationResult::Failure { reason } => {
                self.failed += 1;
                error!("Error in analyzing sentiment: {}", reason);
                AuditLogEntry::failure(
                    &self.name,
                    self.sequence,
                    provider,
                    &self.config.model_id,
                    reason.as_str(),
                )
            }
        };

        if let Err(e) = self.sink.append(&entry).await {
            self.audit_errors += 1;
            error!(target_log = %self.sink.target(), "failed to write audit entry: {}", e);
        }

        if !result.is_success() && self.cancel.is_cancelled() {
            return Err(FinsentError::Cancelled);
        }

        Ok(result.label_or_sentinel().to_string())
    }

    /// Counters so far
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            name: self.name.clone(),
            annotated: self.sequence,
            succeeded: self.succeeded,
            failed: self.failed,
            audit_entries: self.sequence - self.audit_errors,
            audit_errors: self.audit_errors,
            quota: self.tracker.snapshot(),
        }
    }

    /// Close the audit sink and end the session.
    ///
    /// Calling this again on a closed session only returns the summary.
    pub async fn close(&mut self) -> FinsentResult<SessionSummary> {
        if self.state == SessionState::Closed {
            return Ok(self.summary());
        }

        self.state = SessionState::Closed;
        self.sink.close().await?;

        let summary = self.summary();
        info!(
            session = %self.name,
            annotated = summary.annotated,
            failed = summary.failed,
            quota_waits = summary.quota.total_waits(),
            "Session closed."
        );
        Ok(summary)
    }
}

impl Drop for AnnotationSession {
    fn drop(&mut self) {
        if self.state == SessionState::Open {
            warn!(session = %self.name, "session dropped without close; audit log may be unflushed");
        }
    }
}

impl std::fmt::Debug for AnnotationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationSession")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("client", &self.client)
            .field("audit", &self.sink.target())
            .field("sequence", &self.sequence)
            .finish()
    }
}
