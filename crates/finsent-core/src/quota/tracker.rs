//! Fixed-window quota tracker

use super::clock::{SystemClock, WindowClock};
use super::types::{QuotaConfig, QuotaSnapshot, Reservation};
use crate::error::{FinsentError, FinsentResult};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Estimate the token cost of a text.
///
/// This is the character count, not a tokenizer count. It overestimates for
/// most English prose, which keeps the tracker on the safe side of the real
/// provider limit.
pub fn estimate_tokens(text: &str) -> u64 {
    text.chars().count() as u64
}

/// Tracks token and request consumption for the current clock minute.
///
/// The tracker is owned by exactly one session and mutated through
/// `&mut self`, so there is no shared counter between sessions.
///
/// Budgets follow a fixed-bucket policy: once a budget would be exceeded the
/// tracker sleeps until the next minute boundary and then resets its counters
/// without re-measuring what the provider actually saw in that minute.
#[derive(Debug)]
pub struct QuotaTracker {
    config: QuotaConfig,
    clock: Arc<dyn WindowClock>,
    window_start: i64,
    tokens_used: u64,
    requests_used: u64,
    token_waits: u64,
    request_waits: u64,
}

impl QuotaTracker {
    /// Create a tracker aligned to the wall-clock minute
    pub fn new(config: QuotaConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a tracker with a custom window clock
    pub fn with_clock(config: QuotaConfig, clock: Arc<dyn WindowClock>) -> Self {
        let window_start = clock.current_window();
        Self {
            config,
            clock,
            window_start,
            tokens_used: 0,
            requests_used: 0,
            token_waits: 0,
            request_waits: 0,
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    /// Current counters
    pub fn snapshot(&self) -> QuotaSnapshot {
        QuotaSnapshot {
            tokens_used: self.tokens_used,
            requests_used: self.requests_used,
            token_waits: self.token_waits,
            request_waits: self.request_waits,
        }
    }

    /// Wait until both budgets have room, then charge the reservation.
    ///
    /// The token and request budgets are checked independently: either one
    /// alone can trigger a wait. A token wait resets both counters, a request
    /// wait resets only the request counter.
    ///
    /// An estimate larger than the whole token budget waits once and is then
    /// admitted, leaving the window over budget until the next reservation
    /// forces another reset.
    ///
    /// # Errors
    ///
    /// Returns [`FinsentError::Cancelled`] if `cancel` fires during a wait.
    /// Nothing is charged for a cancelled reservation.
    pub async fn reserve(
        &mut self,
        estimated_tokens: u64,
        cancel: &CancellationToken,
    ) -> FinsentResult<Reservation> {
        let mut waited: Option<Duration> = None;

        if self.config.enabled {
            self.roll_window();

            if self.tokens_used.saturating_add(estimated_tokens) > self.config.tokens_per_minute {
                let wait = self.clock.until_next_window();
                warn!(
                    tokens_used = self.tokens_used,
                    estimated_tokens,
                    budget = self.config.tokens_per_minute,
                    "token budget exhausted, waiting {:.2}s for next window",
                    wait.as_secs_f64()
                );
                sleep_or_cancel(wait, cancel).await?;
                self.tokens_used = 0;
                self.requests_used = 0;
                self.token_waits += 1;
                self.window_start = self.clock.current_window();
                waited = Some(waited.unwrap_or_default() + wait);
            }

            if self.requests_used >= self.config.requests_per_minute {
                let wait = self.clock.until_next_window();
                warn!(
                    requests_used = self.requests_used,
                    budget = self.config.requests_per_minute,
                    "request budget exhausted, waiting {:.2}s for next window",
                    wait.as_secs_f64()
                );
                sleep_or_cancel(wait, cancel).await?;
                self.requests_used = 0;
                self.request_waits += 1;
                self.window_start = self.clock.current_window();
                waited = Some(waited.unwrap_or_default() + wait);
            }
        }

        self.tokens_used = self.tokens_used.saturating_add(estimated_tokens);
        self.requests_used += 1;

        debug!(
            tokens_used = self.tokens_used,
            requests_used = self.requests_used,
            "quota reserved {} tokens",
            estimated_tokens
        );

        Ok(Reservation {
            estimated_tokens,
            waited,
        })
    }

    /// Reset the counters if the clock has moved past the window they belong to.
    fn roll_window(&mut self) {
        let current = self.clock.current_window();
        if current != self.window_start {
            debug!(
                from = self.window_start,
                to = current,
                "quota window rolled over"
            );
            self.window_start = current;
            self.tokens_used = 0;
            self.requests_used = 0;
        }
    }
}

async fn sleep_or_cancel(wait: Duration, cancel: &CancellationToken) -> FinsentResult<()> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FinsentError::Cancelled),
        _ = tokio::time::sleep(wait) => Ok(()),
    }
}
