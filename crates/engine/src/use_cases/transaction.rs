//! Bounded re-execution of optimistic transactions.
//!
//! An operation reads snapshots, computes, and commits a guarded changeset.
//! When the commit loses a race the whole operation runs again against fresh
//! snapshots, with a short jittered backoff between attempts.

use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::infrastructure::ports::RepoError;

/// Errors that may succeed if the operation is re-run from scratch.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for RepoError {
    fn is_retryable(&self) -> bool {
        self.is_conflict()
    }
}

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts including the first one (values below 1 act as 1)
    pub max_attempts: u32,
    /// Base delay in milliseconds before the second attempt
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds (caps exponential growth)
    pub max_delay_ms: u64,
    /// Jitter factor (0.0-1.0) so racing requests do not retry in lockstep
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 5,
            max_delay_ms: 100,
            jitter_factor: 0.5,
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// No backoff at all; for tests and single-process stores.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay_ms: 0,
            max_delay_ms: 0,
            jitter_factor: 0.0,
        }
    }
}

/// Runs an operation until it commits, fails for a non-retryable reason,
/// or uses up its attempts.
#[derive(Debug, Clone, Default)]
pub struct TransactionRetry {
    config: RetryConfig,
}

impl TransactionRetry {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    /// Delay before retry number `retry` (1-based), exponential with jitter.
    fn calculate_delay(&self, retry: u32) -> u64 {
        let base = self.config.base_delay_ms;
        let exponential = base.saturating_mul(2u64.saturating_pow(retry.saturating_sub(1)));
        let capped = exponential.min(self.config.max_delay_ms);

        let jitter_range = (capped as f64 * self.config.jitter_factor) as i64;
        if jitter_range > 0 {
            let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
            (capped as i64 + jitter).max(0) as u64
        } else {
            capped
        }
    }

    pub async fn run<T, E, F, Fut>(&self, operation_name: &str, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(
                            attempt,
                            operation = operation_name,
                            "Transaction committed after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.calculate_delay(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay,
                        error = %e,
                        operation = operation_name,
                        "Transaction conflicted, retrying"
                    );
                    if delay > 0 {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    } else {
                        tokio::task::yield_now().await;
                    }
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_retryable() {
                        tracing::error!(
                            attempts = attempt,
                            error = %e,
                            operation = operation_name,
                            "Transaction failed after all retry attempts"
                        );
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    async fn failing(calls: &AtomicU32, failures: u32, error: RepoError) -> Result<u32, RepoError> {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= failures {
            Err(error)
        } else {
            Ok(n)
        }
    }

    #[tokio::test]
    async fn succeeds_without_retry() {
        let calls = AtomicU32::new(0);
        let retry = TransactionRetry::new(RetryConfig::immediate(5));

        let result = retry
            .run("test", || failing(&calls, 0, RepoError::conflict("x")))
            .await;

        assert_eq!(result, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_conflicts_until_commit() {
        let calls = AtomicU32::new(0);
        let retry = TransactionRetry::new(RetryConfig::immediate(5));

        let result = retry
            .run("test", || failing(&calls, 3, RepoError::conflict("stale")))
            .await;

        assert_eq!(result, Ok(4));
    }

    #[tokio::test]
    async fn stops_after_exactly_max_attempts() {
        let calls = AtomicU32::new(0);
        let retry = TransactionRetry::new(RetryConfig::immediate(3));

        let result = retry
            .run("test", || failing(&calls, 100, RepoError::conflict("busy")))
            .await;

        assert!(result.unwrap_err().is_conflict());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_other_failures() {
        let calls = AtomicU32::new(0);
        let retry = TransactionRetry::new(RetryConfig::immediate(5));

        let result = retry
            .run("test", || {
                failing(&calls, 100, RepoError::database("commit", "disk full"))
            })
            .await;

        assert!(matches!(result, Err(RepoError::Database { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let calls = AtomicU32::new(0);
        let retry = TransactionRetry::new(RetryConfig::immediate(0));

        let _ = retry
            .run("test", || failing(&calls, 100, RepoError::conflict("x")))
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let retry = TransactionRetry::new(RetryConfig {
            max_attempts: 10,
            base_delay_ms: 5,
            max_delay_ms: 100,
            jitter_factor: 0.0,
        });

        assert_eq!(retry.calculate_delay(1), 5);
        assert_eq!(retry.calculate_delay(2), 10);
        assert_eq!(retry.calculate_delay(3), 20);
        assert_eq!(retry.calculate_delay(5), 80);
        assert_eq!(retry.calculate_delay(6), 100);
    }

    #[test]
    fn jitter_stays_within_band() {
        let retry = TransactionRetry::new(RetryConfig::default());
        for _ in 0..200 {
            let delay = retry.calculate_delay(1);
            assert!(delay <= 8, "delay {} outside 5 +/- 50%", delay);
        }
    }
}
