//! Ctrl+C handling

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Cancel `token` on the first Ctrl+C.
///
/// Quota waits and retry backoffs observe the token, so the run stops at the
/// next wait point and the current session still closes its audit log.
pub fn cancel_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => {
                        eprintln!("\nInterrupting batch... (Ctrl+C)");
                        token.cancel();
                    }
                    Err(e) => warn!("failed to listen for Ctrl+C: {}", e),
                }
            }
        }
    })
}
