//! Minute-window clocks

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

const WINDOW_SECS: i64 = 60;

/// Source of quota window boundaries.
pub trait WindowClock: Send + Sync + fmt::Debug {
    /// Index of the current window (minutes since the Unix epoch)
    fn current_window(&self) -> i64;

    /// Time left until the next window starts
    fn until_next_window(&self) -> Duration;
}

/// Wall-clock windows aligned to the UTC minute.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WindowClock for SystemClock {
    fn current_window(&self) -> i64 {
        Utc::now().timestamp().div_euclid(WINDOW_SECS)
    }

    fn until_next_window(&self) -> Duration {
        let now = Utc::now();
        let into_window = Duration::from_secs(now.timestamp().rem_euclid(WINDOW_SECS) as u64)
            + Duration::from_nanos(u64::from(now.timestamp_subsec_nanos()));
        Duration::from_secs(WINDOW_SECS as u64).saturating_sub(into_window)
    }
}

/// Clock whose window only moves when told to.
///
/// Every wait lasts `wait`. Useful with a paused tokio runtime, where the
/// sleep completes instantly but still advances `tokio::time::Instant`.
#[derive(Debug)]
pub struct FixedWindowClock {
    window: AtomicI64,
    wait: Duration,
}

impl FixedWindowClock {
    pub fn new(wait: Duration) -> Self {
        Self {
            window: AtomicI64::new(0),
            wait,
        }
    }

    /// Move to the next window
    pub fn advance(&self) {
        self.window.fetch_add(1, Ordering::SeqCst);
    }
}

impl WindowClock for FixedWindowClock {
    fn current_window(&self) -> i64 {
        self.window.load(Ordering::SeqCst)
    }

    fn until_next_window(&self) -> Duration {
        self.wait
    }
}
