// src/error_recovery.rs
//! Retry with exponential backoff for API operations.

use crate::constants::{REMOTE_INITIAL_BACKOFF, REMOTE_MAX_ATTEMPTS, REMOTE_MAX_BACKOFF};
use crate::error::AppError;
use std::time::Duration;

/// Bounds for retrying one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Retries without sleeping between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: REMOTE_MAX_ATTEMPTS,
            initial_delay: REMOTE_INITIAL_BACKOFF,
            max_delay: REMOTE_MAX_BACKOFF,
        }
    }
}

/// Retries an async operation with exponential backoff.
///
/// Only errors for which [`AppError::is_retryable`] holds are retried; any
/// other error is returned immediately.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    policy: RetryPolicy,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_attempts && e.is_retryable() => {
                log::warn!(
                    "Attempt {}/{} failed ({}), retrying after {:?}",
                    attempt,
                    max_attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, policy.max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
