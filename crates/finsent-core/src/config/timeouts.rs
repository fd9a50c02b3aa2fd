//! Default timeout values for completion calls

use std::time::Duration;

/// Default connection timeout for the completion endpoint (30 seconds)
pub const CONNECTION_SECS: u64 = 30;

/// Default request timeout for the completion endpoint (60 seconds)
pub const REQUEST_SECS: u64 = 60;

/// Get connection timeout as Duration
pub fn connection_timeout() -> Duration {
    Duration::from_secs(CONNECTION_SECS)
}

/// Get request timeout as Duration
pub fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_SECS)
}
