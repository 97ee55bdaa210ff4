//! Bounded retry with a fixed delay between attempts.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Default number of connection attempts.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 30;
/// Default delay between attempts in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

/// How often and how patiently to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts in total, including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

/// Why a retried operation gave up.
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// Every attempt failed with a retryable error.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },

    /// An attempt failed with an error that is not worth retrying.
    #[error("attempt {attempt} failed with a non-retryable error: {error}")]
    Aborted { attempt: u32, error: E },
}

/// Run `op` until it succeeds, `should_retry` rejects its error, or the
/// policy runs out of attempts.
///
/// `op` receives the 1-based attempt number. On success the value is
/// returned together with the attempt that produced it.
pub async fn retry_with_fixed_delay<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    should_retry: P,
    mut op: F,
) -> Result<(T, u32), RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    info!("Succeeded after {} attempts", attempt);
                }
                return Ok((value, attempt));
            }
            Err(error) if !should_retry(&error) => {
                return Err(RetryError::Aborted { attempt, error });
            }
            Err(last) if attempt >= max_attempts => {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last,
                });
            }
            Err(e) => {
                warn!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}...",
                    attempt, max_attempts, e, policy.delay
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}

/// Poll `probe` until it succeeds. Returns false once the policy is
/// exhausted; never returns an error.
pub async fn wait_until_ready<E, F, Fut>(policy: &RetryPolicy, probe: F) -> bool
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    match retry_with_fixed_delay(policy, |_| true, probe).await {
        Ok(((), attempt)) => {
            info!("Ready after {} attempt(s)", attempt);
            true
        }
        Err(e) => {
            warn!("Not ready: {}", e);
            false
        }
    }
}
