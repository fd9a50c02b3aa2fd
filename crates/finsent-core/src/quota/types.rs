//! Quota configuration and reporting types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-minute budgets for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaConfig {
    /// Estimated tokens admitted per clock minute
    pub tokens_per_minute: u64,
    /// Requests admitted per clock minute
    pub requests_per_minute: u64,
    /// Whether budgets are enforced at all
    pub enabled: bool,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            tokens_per_minute: 400_000,
            requests_per_minute: 500,
            enabled: true,
        }
    }
}

impl QuotaConfig {
    /// Create an enabled quota configuration
    pub fn new(tokens_per_minute: u64, requests_per_minute: u64) -> Self {
        Self {
            tokens_per_minute,
            requests_per_minute,
            enabled: true,
        }
    }

    /// Create a configuration that never waits
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// A granted reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// Tokens charged against the current window
    pub estimated_tokens: u64,
    /// Total time spent waiting for a window reset, if any
    pub waited: Option<Duration>,
}

impl Reservation {
    /// Whether granting this reservation required a wait
    pub fn did_wait(&self) -> bool {
        self.waited.is_some()
    }
}

/// Point-in-time view of a tracker's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuotaSnapshot {
    pub tokens_used: u64,
    pub requests_used: u64,
    /// Waits triggered by the token budget
    pub token_waits: u64,
    /// Waits triggered by the request budget
    pub request_waits: u64,
}

impl QuotaSnapshot {
    /// Total wait-and-reset cycles
    pub fn total_waits(&self) -> u64 {
        self.token_waits + self.request_waits
    }
}
