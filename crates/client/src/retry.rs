//! Timeout and retry-with-backoff wrappers for remote calls.
//!
//! Every resource fetch in the orchestration layer goes through
//! [`fetch_with_policy`], which composes the two primitives: each attempt
//! is raced against a per-attempt timeout, and failed attempts are retried
//! with exponential backoff until the attempt budget is spent.

use std::future::Future;
use std::time::Duration;

use crate::error::ApiError;

/// Tunable parameters for the retry/timeout composition.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Backoff before retry `k` (1-based) is `base_delay * 2^(k-1)`.
    pub base_delay: Duration,
    /// Timeout applied to each individual attempt.
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Race an operation against a timer.
///
/// If the timer fires first, the result is [`ApiError::Timeout`] carrying
/// `label`; otherwise the operation's own outcome is returned. Exactly one
/// of the two is observed -- the losing side's eventual settlement is
/// dropped with the future. No cancellation of the underlying call is
/// implied.
pub async fn with_timeout<T, F>(
    operation: F,
    timeout: Duration,
    label: &'static str,
) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => Err(ApiError::Timeout { label }),
    }
}

/// Invoke an operation factory up to `max_attempts` times with exponential
/// backoff between failures.
///
/// The factory (not a stored future) is re-invoked on every attempt, so a
/// composed per-attempt timeout gets a fresh window each time. The final
/// attempt's failure is propagated unchanged. `max_attempts` of zero still
/// performs one attempt.
pub async fn with_retry<T, F, Fut>(
    mut factory: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match factory().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                let delay = base_delay * 2u32.saturating_pow(attempt - 1);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying with backoff"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                tracing::error!(attempt, error = %e, "All attempts exhausted");
                return Err(e);
            }
        }
    }
}

/// The composition used by every resource fetch:
/// `with_retry(|| with_timeout(call(), timeout, label), attempts, delay)`.
pub async fn fetch_with_policy<T, F, Fut>(
    policy: &RetryPolicy,
    label: &'static str,
    mut factory: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    with_retry(
        || with_timeout(factory(), policy.request_timeout, label),
        policy.max_attempts,
        policy.base_delay,
    )
    .await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    fn status_error() -> ApiError {
        ApiError::Status {
            status: 503,
            body: "unavailable".into(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fires_when_operation_never_settles() {
        let result: Result<(), ApiError> = with_timeout(
            std::future::pending(),
            Duration::from_secs(10),
            "summary",
        )
        .await;

        assert_matches!(result, Err(ApiError::Timeout { label: "summary" }));
    }

    #[tokio::test(start_paused = true)]
    async fn prompt_settlement_wins_the_race() {
        let result = with_timeout(
            async { Ok::<_, ApiError>(42) },
            Duration::from_secs(10),
            "summary",
        )
        .await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn operation_error_passes_through_unchanged() {
        let result: Result<(), ApiError> = with_timeout(
            async { Err(status_error()) },
            Duration::from_secs(10),
            "vessels",
        )
        .await;

        assert_matches!(result, Err(ApiError::Status { status: 503, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn retry_succeeds_on_final_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = with_retry(
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(status_error())
                    } else {
                        Ok(n)
                    }
                }
            },
            3,
            Duration::from_secs(1),
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_stops_at_attempt_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), ApiError> = with_retry(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(status_error()) }
            },
            3,
            Duration::from_secs(1),
        )
        .await;

        // The final failure propagates unchanged.
        assert_matches!(result, Err(ApiError::Status { status: 503, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_doubles_between_attempts() {
        let times: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));
        let recorder = times.clone();

        let _: Result<(), ApiError> = with_retry(
            move || {
                recorder.lock().unwrap().push(Instant::now());
                async { Err(status_error()) }
            },
            4,
            Duration::from_secs(1),
        )
        .await;

        let times = times.lock().unwrap();
        assert_eq!(times.len(), 4);
        assert_eq!(times[1] - times[0], Duration::from_secs(1));
        assert_eq!(times[2] - times[1], Duration::from_secs(2));
        assert_eq!(times[3] - times[2], Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempt_budget_still_tries_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), ApiError> = with_retry(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(status_error()) }
            },
            0,
            Duration::from_secs(1),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn each_attempt_gets_a_fresh_timeout_window() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(10),
        };

        // First two attempts hang past the timeout, the third answers.
        let result = fetch_with_policy(&policy, "messages", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    std::future::pending::<Result<u32, ApiError>>().await
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_policy_surfaces_the_timeout() {
        let policy = RetryPolicy::default();

        let result: Result<(), ApiError> = fetch_with_policy(&policy, "activities", || {
            std::future::pending()
        })
        .await;

        assert_matches!(result, Err(ApiError::Timeout { label: "activities" }));
    }
}
