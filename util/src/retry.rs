//! Bounded retry for idempotent storage reads.
//!
//! Only reads go through here. Writes that may have partially applied are never
//! retried blindly; callers re-run the whole operation instead.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Attempts made before the last error is returned.
pub const MAX_READ_ATTEMPTS: u32 = 3;

/// Runs `op` up to [`MAX_READ_ATTEMPTS`] times, sleeping `100ms * attempt` between tries.
pub async fn retry_read<T, E, F, Fut>(label: &str, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempts >= MAX_READ_ATTEMPTS => {
                tracing::error!(
                    "Read '{}' failed after {} attempts: {}",
                    label,
                    attempts,
                    e
                );
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(
                    "Attempt {} of read '{}' failed: {}. Retrying...",
                    attempts,
                    label,
                    e
                );
                tokio::time::sleep(Duration::from_millis(100 * attempts as u64)).await;
            }
        }
    }
}
