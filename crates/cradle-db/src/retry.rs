//! Transient error retry logic.
//!
//! Remote libSQL (Turso) databases occasionally reject statements while
//! nodes are recycled or locks are contended during provisioning. These
//! errors resolve on their own within seconds, so writes are retried with
//! capped exponential backoff. Local databases never produce them.

use std::future::Future;
use std::time::Duration;

use cradle_config::DatabaseConfig;

use crate::error::DatabaseError;

/// Configuration for retry behavior on transient store errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_attempts: config.retry_max_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
        }
    }
}

impl RetryConfig {
    /// No retries at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before attempt `attempt + 1`, doubling from `base_delay` up to `max_delay`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Detect transient Turso infrastructure errors.
///
/// SQL and constraint errors never match.
pub fn is_transient_turso_error(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("unable to acquire shared lock")
        || msg.contains("deletion must be in progress")
        || msg.contains("database is locked")
}

fn is_transient(e: &DatabaseError) -> bool {
    matches!(e, DatabaseError::LibSql(inner) if is_transient_turso_error(inner))
}

/// Run `op`, retrying while it fails with a transient store error.
///
/// `op` must be safe to repeat: each attempt has to either fully apply or
/// leave no trace (single statements, or transactions that roll back).
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-transient error immediately.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    label: &str,
    mut op: F,
) -> Result<T, DatabaseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(e) if is_transient(&e) && attempt < config.max_attempts => {
                let delay = config.delay_after(attempt);
                tracing::warn!(
                    %label,
                    attempt,
                    max_attempts = config.max_attempts,
                    ?delay,
                    error = %e,
                    "transient store error, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}
