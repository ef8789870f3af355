//! Retry with linear backoff.

use std::fmt::Display;
use std::future::Future;

use log::warn;

use crate::config::RetryPolicy;

/// Run `operation` until it succeeds or `policy.max_attempts` attempts have failed.
///
/// After failed attempt `i` (1-based) the task sleeps `i * policy.base_delay`;
/// there is no sleep after the final attempt. Returns the last error together
/// with the number of attempts made.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, (E, u32)>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => return Err((e, attempt)),
            Err(e) => {
                let delay = policy.base_delay * attempt;
                warn!(
                    "Retrying after error (attempt {attempt}/{max_attempts}, waiting {delay:?}): {e}"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
