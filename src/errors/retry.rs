use std::future::Future;
use std::time::Duration;

use super::types::FalcoriaError;
use tracing::warn;

/// Retry policy for backend requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and attempts remain.
/// The final error is returned unchanged.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, FalcoriaError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FalcoriaError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        let err = match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let classification = err.classify();
        if !classification.retryable {
            warn!(
                operation = operation_name,
                error_type = classification.error_type,
                "Non-retryable error, failing immediately"
            );
            return Err(err);
        }
        if attempt >= max_attempts {
            warn!(
                operation = operation_name,
                attempt,
                max = max_attempts,
                "Max retries exhausted"
            );
            return Err(err);
        }

        warn!(
            operation = operation_name,
            attempt,
            max = max_attempts,
            error_type = classification.error_type,
            delay_ms = config.delay.as_millis() as u64,
            error = %err,
            "Retrying after error"
        );
        tokio::time::sleep(config.delay).await;
    }
}
