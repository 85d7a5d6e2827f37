//! Caller-side retry for mapping updates.

use std::thread::sleep;
use std::time::Duration;

use oda_schemas::SchemaError;
use tracing::{error, warn};

/// Exponential backoff settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub initial_delay: Duration,
}

impl Backoff {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(500))
    }
}

/// Run `operation`, retrying retryable failures with exponential backoff.
///
/// Errors that [`SchemaError::is_retryable`] rejects are returned at once.
pub fn retry_with_backoff<T, F>(backoff: &Backoff, mut operation: F) -> Result<T, SchemaError>
where
    F: FnMut() -> Result<T, SchemaError>,
{
    let mut attempts = 0;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempts < backoff.max_retries => {
                attempts += 1;
                let delay = backoff.delay(attempts);
                warn!(
                    attempt = attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "retrying"
                );
                sleep(delay);
            }
            Err(e) => {
                if e.is_retryable() {
                    error!(attempts = attempts + 1, error = %e, "exhausted retries");
                }
                return Err(e);
            }
        }
    }
}
