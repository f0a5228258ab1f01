//! Bounded retry with exponential back-off.
//!
//! [`execute_with_retry`] wraps any fallible async operation. Errors whose
//! message mentions `401` or `invalid` are treated as permanent and returned
//! without another attempt.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Returns `true` for errors that a retry cannot fix (bad credentials,
/// rejected input).
pub fn is_permanent<E: Display>(err: &E) -> bool {
    let message = err.to_string();
    message.contains("401") || message.contains("invalid")
}

/// Runs `operation` at most `max_attempts` times in total.
///
/// Back-off schedule with `initial_delay_ms = 1_000`:
///
/// | Failed attempt | Sleep before next attempt |
/// |----------------|---------------------------|
/// | 1              | 1 000 ms × 2⁰             |
/// | 2              | 1 000 ms × 2¹             |
/// | 3              | 1 000 ms × 2²             |
///
/// No sleep follows the final attempt. A `max_attempts` of `0` still runs the
/// operation once. Permanent errors (see [`is_permanent`]) are returned
/// immediately; otherwise the last error is returned once attempts run out.
///
/// # Errors
///
/// Returns the error from the last attempt made.
pub async fn execute_with_retry<T, E, F, Fut>(
    max_attempts: u32,
    initial_delay_ms: u64,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if is_permanent(&err) {
                    tracing::debug!(attempt, error = %err, "permanent error; not retrying");
                    return Err(err);
                }
                if attempt + 1 >= max_attempts {
                    return Err(err);
                }
                let delay_ms = initial_delay_ms.saturating_mul(1u64 << attempt.min(20));
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms,
                    error = %err,
                    "operation failed; retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                attempt += 1;
            }
        }
    }
}
