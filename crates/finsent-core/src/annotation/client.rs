//! Annotation client: one article in, one result out

use super::request::{AnnotationRequest, AnnotationResult};
use crate::error::{FinsentError, FinsentResult, UnifiedError};
use crate::llm::{Completion, CompletionService};
use crate::quota::QuotaTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Bounded retry for transient service failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each further retry
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Send each request exactly once
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_secs(1),
        }
    }

    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2_u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Wraps a [`CompletionService`] and classifies its failures.
#[derive(Clone)]
pub struct AnnotationClient {
    service: Arc<dyn CompletionService>,
    retry: RetryPolicy,
}

impl AnnotationClient {
    /// Create a client that sends each request once
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self {
            service,
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &'static str {
        self.service.name()
    }

    /// Annotate one article.
    ///
    /// Never returns an error. Transport errors, provider rejections,
    /// malformed payloads and empty answers all become
    /// [`AnnotationResult::Failure`]. Cancellation during a call or a retry
    /// backoff is reported the same way.
    ///
    /// Retries are not charged to any quota; see [`call_metered`](Self::call_metered).
    pub async fn call(
        &self,
        request: &AnnotationRequest<'_>,
        cancel: &CancellationToken,
    ) -> AnnotationResult {
        self.run(request, None, cancel).await
    }

    /// Annotate one article, reserving one more request from `tracker`
    /// before every retry.
    ///
    /// The first attempt must already be reserved by the caller. A retry
    /// waits for the next window when the request budget is spent, so no
    /// attempt goes out past the budget.
    pub async fn call_metered(
        &self,
        request: &AnnotationRequest<'_>,
        tracker: &mut QuotaTracker,
        cancel: &CancellationToken,
    ) -> AnnotationResult {
        self.run(request, Some(tracker), cancel).await
    }

    #[instrument(
        skip(self, request, tracker, cancel),
        fields(provider = self.service.name(), model = request.model_id, chars = request.text.len())
    )]
    async fn run(
        &self,
        request: &AnnotationRequest<'_>,
        tracker: Option<&mut QuotaTracker>,
        cancel: &CancellationToken,
    ) -> AnnotationResult {
        match self.complete_with_retry(request, tracker, cancel).await {
            Ok(completion) => {
                if completion.content.trim().is_empty() {
                    warn!("completion returned an empty label");
                    return AnnotationResult::Failure {
                        reason: "completion returned an empty label".to_string(),
                    };
                }
                debug!(label = %completion.content, "annotation succeeded");
                AnnotationResult::Success {
                    label: completion.content,
                    raw_payload: completion.raw_payload,
                }
            }
            Err(error) => AnnotationResult::Failure {
                reason: error.to_string(),
            },
        }
    }

    async fn complete_with_retry(
        &self,
        request: &AnnotationRequest<'_>,
        mut tracker: Option<&mut QuotaTracker>,
        cancel: &CancellationToken,
    ) -> FinsentResult<Completion> {
        let completion_request = request.to_completion_request();
        let max_retries = self.retry.max_retries;
        let mut attempt = 0;

        loop {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(FinsentError::Cancelled),
                result = self.service.complete(&completion_request) => result,
            };

            let error = match outcome {
                Ok(completion) => {
                    if attempt > 0 {
                        info!(attempt, "request succeeded after retry");
                    }
                    return Ok(completion);
                }
                Err(error) => error,
            };

            if !error.is_retryable() {
                warn!(error = %error, "non-retryable error");
                return Err(error);
            }

            if attempt >= max_retries {
                if max_retries > 0 {
                    warn!(attempts = attempt + 1, "all retry attempts exhausted");
                }
                return Err(error);
            }

            let delay = self.retry.delay_for(attempt);
            warn!(
                "Request failed (attempt {}/{}): {}. Retrying in {:.2}s...",
                attempt + 1,
                max_retries + 1,
                error,
                delay.as_secs_f64()
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(FinsentError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
            attempt += 1;

            if let Some(tracker) = tracker.as_deref_mut() {
                tracker.reserve(0, cancel).await?;
            }
        }
    }
}

impl std::fmt::Debug for AnnotationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationClient")
            .field("provider", &self.service.name())
            .field("retry", &self.retry)
            .finish()
    }
}
