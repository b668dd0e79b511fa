//! Retry-wrapped model invocation.
//!
//! One generation is a bounded sequence of attempts against a provider. Every
//! provider error is treated as transient; between attempts the caller waits
//! `base_delay * 2^attempt`. An empty completion ends the sequence at once.

use crate::error::{ApiError, GenerationError};
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Attempt bound and backoff schedule for one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Wait after the zero-based `attempt` failed.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Suspension between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Send `prompt` to `client`, retrying failed calls according to `policy`.
///
/// Returns the raw completion text. Whitespace-only output counts as empty.
pub async fn generate_with_retry(
    client: &dyn ModelProviderClient,
    prompt: &str,
    options: &CompletionOptions,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<String, GenerationError> {
    let max_attempts = policy.attempts();
    let mut last_error: Option<ApiError> = None;

    for attempt in 0..max_attempts {
        info!(
            provider = client.provider_name(),
            model = client.model_name(),
            "Attempt {}/{} to generate test cases...",
            attempt + 1,
            max_attempts
        );

        let started = Instant::now();
        match client
            .complete(vec![ChatMessage::user(prompt)], options.clone())
            .await
        {
            Ok(response) => {
                debug!(
                    duration_ms = started.elapsed().as_millis() as u64,
                    prompt_tokens = response.usage.prompt_tokens,
                    completion_tokens = response.usage.completion_tokens,
                    finish_reason = ?response.finish_reason,
                    "Provider call completed"
                );
                if response.content.trim().is_empty() {
                    warn!("Model returned an empty response.");
                    return Err(GenerationError::EmptyResponse);
                }
                return Ok(response.content);
            }
            Err(err) => {
                warn!(attempt = attempt + 1, error = %err, "API call failed");
                last_error = Some(err);
                if attempt + 1 < max_attempts {
                    let wait = policy.delay_for_attempt(attempt);
                    info!("Retrying in {} seconds...", wait.as_secs_f64());
                    sleeper.sleep(wait).await;
                }
            }
        }
    }

    warn!(attempts = max_attempts, "Max retries reached.");
    Err(GenerationError::RetriesExhausted {
        attempts: max_attempts,
        last_error: Box::new(last_error.unwrap_or_else(|| {
            ApiError::ProviderError("no attempt was made".to_string())
        })),
    })
}
