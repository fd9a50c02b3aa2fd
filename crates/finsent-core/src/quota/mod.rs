//! Client-side quota tracking for completion calls
//!
//! Two independent budgets are tracked per clock minute: estimated tokens and
//! requests. A reservation that would overrun either budget waits for the
//! next minute boundary instead of being truncated or rejected.

mod clock;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{FixedWindowClock, SystemClock, WindowClock};
pub use tracker::{QuotaTracker, estimate_tokens};
pub use types::{QuotaConfig, QuotaSnapshot, Reservation};
