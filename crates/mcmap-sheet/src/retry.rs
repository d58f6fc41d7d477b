//! Retry with exponential back-off and jitter for sheet fetches.
//!
//! [`retry_with_backoff`] wraps a fallible async fetch and retries transient
//! failures. A missing sheet, a client-side status, a decode failure or a
//! bad URL is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::SheetError;

const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connect failures, HTTP 5xx, and HTTP 429.
///
/// **Not retriable:** [`SheetError::NotFound`], 4xx other than 429,
/// [`SheetError::Parse`], [`SheetError::InvalidUrl`] and
/// [`SheetError::RecentlyFailed`].
pub(crate) fn is_retriable(err: &SheetError) -> bool {
    match err {
        SheetError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SheetError::RateLimited { .. } => true,
        SheetError::UnexpectedStatus { status, .. } => *status >= 500,
        SheetError::NotFound { .. }
        | SheetError::Parse { .. }
        | SheetError::InvalidUrl { .. }
        | SheetError::RecentlyFailed { .. } => false,
    }
}

/// Delay before retry number `attempt` (1-based), before jitter.
///
/// A `Retry-After` hint from a 429 raises the delay; the result never
/// exceeds 60 s.
pub(crate) fn backoff_delay_ms(attempt: u32, backoff_base_ms: u64, err: &SheetError) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    let hinted = match err {
        SheetError::RateLimited {
            retry_after_secs, ..
        } => computed.max(retry_after_secs.saturating_mul(1_000)),
        _ => computed,
    };
    hinted.min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SheetError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SheetError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = backoff_delay_ms(attempt, backoff_base_ms, &err);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err.summary(),
                    "transient sheet fetch error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
