//! Bounded retry with exponential back-off and jitter for the login stage.
//!
//! The retry policy applies to login only: everything after a confirmed
//! session is a single pass. The attempt closure receives the 1-based
//! attempt number so it can reset browser state (cookies) before re-trying.

use std::future::Future;
use std::time::Duration;

use crate::error::ScrapeError;

/// Runs `attempt` up to `max_attempts` times, sleeping with exponential
/// back-off (±25 % jitter, capped at 60 s) between failures.
///
/// The final failure is wrapped in [`ScrapeError::AttemptsExhausted`] with
/// the last underlying error as its source.
///
/// # Errors
///
/// Returns the wrapped last error once all attempts are used up.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    backoff_base_ms: u64,
    mut attempt: F,
) -> Result<T, ScrapeError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let max_attempts = max_attempts.max(1);
    let mut n = 1u32;
    loop {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(err) if n >= max_attempts => {
                return Err(ScrapeError::AttemptsExhausted {
                    attempts: max_attempts,
                    last: Box::new(err),
                });
            }
            Err(err) => {
                let computed = backoff_base_ms.saturating_mul(1u64 << (n - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt = n,
                    max_attempts,
                    delay_ms,
                    error = %err,
                    "login attempt failed, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                n += 1;
            }
        }
    }
}
